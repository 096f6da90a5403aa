//! The error returned by every query.

use std::time::Duration;

use crate::transport::TransportError;

/// Why a query failed.
///
/// Every variant is reported through the same [`QueryFailed`] error, so callers
/// that only care about success or failure never have to match on this.
#[derive(Debug, thiserror::Error)]
pub enum FailureCause {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
    /// A page did not carry the list field or the `pagination` object.
    #[error("missing field `{0}` in page")]
    MissingField(&'static str),
    #[error("stopped after {0} pages without reaching the last page")]
    PageLimit(usize),
    #[error("aggregation deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

/// A query could not be completed.
///
/// Transport failures, non-2xx responses, undecodable bodies and malformed
/// pages all surface as this one error. The URL of the failing request and the
/// underlying [`FailureCause`] are kept for diagnostics.
#[derive(Debug, thiserror::Error)]
#[error("query failed for {url}: {cause}")]
pub struct QueryFailed {
    url: String,
    #[source]
    cause: FailureCause,
}

impl QueryFailed {
    pub(crate) fn new(url: impl Into<String>, cause: impl Into<FailureCause>) -> Self {
        Self {
            url: url.into(),
            cause: cause.into(),
        }
    }

    /// The URL of the request that failed.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The HTTP status code, if the node answered with a non-2xx status.
    pub fn status(&self) -> Option<u16> {
        match self.cause {
            FailureCause::Status(code) => Some(code),
            _ => None,
        }
    }

    pub fn cause(&self) -> &FailureCause {
        &self.cause
    }

    pub fn into_cause(self) -> FailureCause {
        self.cause
    }
}

/// Result type alias for query operations.
pub type Result<T> = std::result::Result<T, QueryFailed>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn status_is_exposed_only_for_status_failures() {
        let err = QueryFailed::new("http://node/x", FailureCause::Status(503));
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.url(), "http://node/x");

        let err = QueryFailed::new("http://node/x", FailureCause::MissingField("balances"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn display_includes_url_and_cause() {
        let err = QueryFailed::new("http://node/y", FailureCause::PageLimit(3));
        assert_eq!(
            err.to_string(),
            "query failed for http://node/y: stopped after 3 pages without reaching the last page"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn json_errors_convert_into_cause() {
        let json_err = serde_json::from_slice::<serde_json::Value>(b"<html>").unwrap_err();
        let err = QueryFailed::new("http://node/z", json_err);
        assert!(matches!(err.cause(), FailureCause::Json(_)));
    }
}
