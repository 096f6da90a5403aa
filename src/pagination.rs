//! Cursor-based pagination over list endpoints.
//!
//! Every list page carries its items under an endpoint-specific array field and
//! a `pagination` object whose `next_key` names the start of the next page. A
//! missing or `null` `next_key` marks the last page.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FailureCause;

/// Which query parameters follow-up page requests carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuationParams {
    /// Only `pagination.key`. Filters sent with the first page (such as a
    /// proposal status) are not repeated, so later pages are unfiltered.
    #[default]
    CursorOnly,
    /// The first page's parameters plus `pagination.key`.
    ResendFilters,
}

/// One decoded page of a list endpoint.
#[derive(Debug, PartialEq)]
pub(crate) struct Page {
    pub(crate) items: Vec<Value>,
    pub(crate) next_key: Option<String>,
}

impl Page {
    pub(crate) fn extract(mut body: Value, list_field: &'static str) -> Result<Self, FailureCause> {
        let items = match body.get_mut(list_field).map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => return Err(FailureCause::MissingField(list_field)),
        };
        let next_key = match body.get("pagination") {
            Some(Value::Object(pagination)) => match pagination.get("next_key") {
                None | Some(Value::Null) => None,
                Some(Value::String(key)) => Some(key.clone()),
                Some(other) => Some(other.to_string()),
            },
            _ => return Err(FailureCause::MissingField("pagination")),
        };
        Ok(Self { items, next_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_items_and_next_key() {
        let body = json!({
            "validators": [{"moniker": "a"}, {"moniker": "b"}],
            "pagination": {"next_key": "CCC", "total": "0"}
        });
        let page = Page::extract(body, "validators").unwrap();
        assert_eq!(page.items, vec![json!({"moniker": "a"}), json!({"moniker": "b"})]);
        assert_eq!(page.next_key.as_deref(), Some("CCC"));
    }

    #[test]
    fn null_or_absent_next_key_ends_pagination() {
        let page = Page::extract(json!({"votes": [], "pagination": {"next_key": null}}), "votes")
            .unwrap();
        assert_eq!(page.next_key, None);

        let page = Page::extract(json!({"votes": [1], "pagination": {}}), "votes").unwrap();
        assert_eq!(page.items, vec![json!(1)]);
        assert_eq!(page.next_key, None);
    }

    #[test]
    fn missing_list_field_fails() {
        let err = Page::extract(json!({"pagination": {"next_key": null}}), "balances").unwrap_err();
        assert!(matches!(err, FailureCause::MissingField("balances")));

        let err = Page::extract(json!({"balances": {}, "pagination": {}}), "balances").unwrap_err();
        assert!(matches!(err, FailureCause::MissingField("balances")));
    }

    #[test]
    fn missing_pagination_object_fails() {
        let err = Page::extract(json!({"balances": []}), "balances").unwrap_err();
        assert!(matches!(err, FailureCause::MissingField("pagination")));
    }

    #[test]
    fn continuation_policy_deserializes_from_snake_case() {
        let policy: ContinuationParams = serde_json::from_str("\"resend_filters\"").unwrap();
        assert_eq!(policy, ContinuationParams::ResendFilters);
        assert_eq!(ContinuationParams::default(), ContinuationParams::CursorOnly);
    }
}
