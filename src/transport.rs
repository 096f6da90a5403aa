//! The HTTP capability the client issues its GET requests through.

use std::future::Future;
use std::time::Duration;

/// A raw HTTP response: status code and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (connection, TLS, timeout, ...).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

/// Performs a single GET request.
///
/// Implementations return non-2xx responses as `Ok`; classifying the status
/// is the client's job.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

#[cfg(feature = "client")]
pub use http::HttpTransport;

#[cfg(feature = "client")]
mod http {
    use super::*;
    use reqwest::Client;

    impl From<reqwest::Error> for TransportError {
        fn from(err: reqwest::Error) -> Self {
            Self::new(err)
        }
    }

    /// [`Transport`] backed by a shared `reqwest` client.
    #[derive(Debug, Clone, Default)]
    pub struct HttpTransport {
        client: Client,
    }

    impl HttpTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Reuse an existing `reqwest` client (and its connection pool).
        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl Transport for HttpTransport {
        async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError> {
            let response = self.client.get(url).timeout(timeout).send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            Ok(HttpResponse::new(status, body.to_vec()))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;

    #[test]
    fn success_covers_the_2xx_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[tokio::test]
    async fn mock_replays_in_order_and_records_urls() {
        let transport = MockTransport::new().respond(200, "a").fail("boom");
        let timeout = Duration::from_secs(1);

        let first = transport.get("http://a", timeout).await.unwrap();
        assert_eq!(first.body, b"a");
        assert!(transport.get("http://b", timeout).await.is_err());
        assert!(transport.get("http://c", timeout).await.is_err());
        assert_eq!(transport.requests(), ["http://a", "http://b", "http://c"]);
        assert_eq!(transport.timeouts(), [timeout; 3]);
    }
}
