//! Request targets and URL construction.
//!
//! Paths and query parameter values are used verbatim. The only value that is
//! ever percent-encoded is the pagination cursor on continuation requests.

use crate::pagination::ContinuationParams;

/// Query parameter carrying the pagination cursor.
pub const PAGINATION_KEY_PARAM: &str = "pagination.key";

/// Which of the node's two HTTP surfaces a request goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Base {
    /// The REST state-query endpoint (`/cosmos/...`).
    Rest,
    /// The node RPC endpoint (`/status`, `/block`, ...).
    Rpc,
}

/// A fully resolved request target, minus the base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    base: Base,
    path: String,
    params: Vec<(String, String)>,
    list_field: Option<&'static str>,
}

impl Endpoint {
    pub fn new(base: Base, path: impl Into<String>) -> Self {
        Self {
            base,
            path: path.into(),
            params: Vec::new(),
            list_field: None,
        }
    }

    pub fn rest(path: impl Into<String>) -> Self {
        Self::new(Base::Rest, path)
    }

    pub fn rpc(path: impl Into<String>) -> Self {
        Self::new(Base::Rpc, path)
    }

    /// Append a `key=value` query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Mark the endpoint as paginated, aggregating the array at `list_field`.
    pub fn paged(mut self, list_field: &'static str) -> Self {
        self.list_field = Some(list_field);
        self
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// The array field aggregated across pages, or `None` for single-fetch endpoints.
    pub fn list_field(&self) -> Option<&'static str> {
        self.list_field
    }

    /// URL of the first (or only) request: `base_url + path [? k=v&...]`.
    pub fn url(&self, base_url: &str) -> String {
        let pairs = self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        join_url(base_url, &self.path, pairs)
    }

    /// URL of a follow-up page request resuming at `cursor`.
    ///
    /// With [`ContinuationParams::CursorOnly`] the first request's parameters
    /// are not sent again. With [`ContinuationParams::ResendFilters`] they are,
    /// except for any existing `pagination.*` parameter.
    pub fn continuation_url(
        &self,
        base_url: &str,
        cursor: &str,
        continuation: ContinuationParams,
    ) -> String {
        let encoded = encode_cursor(cursor);
        let filters = self
            .params
            .iter()
            .filter(|_| continuation == ContinuationParams::ResendFilters)
            .filter(|(k, _)| !k.starts_with("pagination."))
            .map(|(k, v)| (k.as_str(), v.as_str()));
        let pairs = filters.chain(std::iter::once((PAGINATION_KEY_PARAM, encoded.as_str())));
        join_url(base_url, &self.path, pairs)
    }
}

/// Percent-encode an opaque pagination cursor for use as a query value.
pub fn encode_cursor(cursor: &str) -> String {
    url::form_urlencoded::byte_serialize(cursor.as_bytes()).collect()
}

fn join_url<'a>(
    base_url: &str,
    path: &str,
    pairs: impl Iterator<Item = (&'a str, &'a str)>,
) -> String {
    let mut url = format!("{base_url}{path}");
    for (i, (key, value)) in pairs.enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(value);
    }
    url
}
