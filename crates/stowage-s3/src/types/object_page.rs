//! Listing result pages.

use aws_sdk_s3::operation::list_objects::ListObjectsOutput;
use serde::{Deserialize, Serialize};

use super::object_summary::ObjectSummary;

/// One page of listing results.
///
/// The marker is an opaque continuation cursor produced by the service;
/// callers pass it back verbatim to resume listing after the last returned
/// item, and never construct or modify one themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectPage {
    /// Entries of this page, in service-defined order.
    pub items: Vec<ObjectSummary>,
    /// Cursor for the next page, present whenever more entries remain.
    pub next_marker: Option<String>,
    /// Whether the listing was truncated at the requested page size.
    pub has_more: bool,
}

impl ObjectPage {
    /// Builds a page from a raw listing response.
    pub(crate) fn from_response(bucket_name: &str, response: ListObjectsOutput) -> Self {
        let items: Vec<ObjectSummary> = response
            .contents()
            .iter()
            .map(|object| ObjectSummary::from_object(bucket_name, object))
            .collect();

        let has_more = response.is_truncated().unwrap_or(false);

        // The v1 listing API only sets NextMarker when a delimiter is in
        // play; the documented fallback cursor is the last key of the page.
        let next_marker = if has_more {
            response
                .next_marker()
                .map(str::to_string)
                .or_else(|| items.last().map(|item| item.key.clone()))
        } else {
            None
        };

        Self {
            items,
            next_marker,
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::types::Object;

    use super::*;

    fn entry(key: &str) -> Object {
        Object::builder().key(key).size(1).build()
    }

    #[test]
    fn test_terminal_page_has_no_marker() {
        let response = ListObjectsOutput::builder()
            .contents(entry("a/1"))
            .contents(entry("a/2"))
            .is_truncated(false)
            .build();

        let page = ObjectPage::from_response("artifacts", response);
        assert_eq!(page.items.len(), 2);
        assert!(!page.has_more);
        assert!(page.next_marker.is_none());
    }

    #[test]
    fn test_truncated_page_uses_service_marker() {
        let response = ListObjectsOutput::builder()
            .contents(entry("a/1"))
            .is_truncated(true)
            .next_marker("a/1")
            .build();

        let page = ObjectPage::from_response("artifacts", response);
        assert!(page.has_more);
        assert_eq!(page.next_marker.as_deref(), Some("a/1"));
    }

    #[test]
    fn test_truncated_page_falls_back_to_last_key() {
        let response = ListObjectsOutput::builder()
            .contents(entry("a/1"))
            .contents(entry("a/2"))
            .is_truncated(true)
            .build();

        let page = ObjectPage::from_response("artifacts", response);
        assert!(page.has_more);
        assert_eq!(page.next_marker.as_deref(), Some("a/2"));
    }

    #[test]
    fn test_empty_page() {
        let response = ListObjectsOutput::builder().build();

        let page = ObjectPage::from_response("artifacts", response);
        assert!(page.items.is_empty());
        assert!(!page.has_more);
        assert!(page.next_marker.is_none());
    }
}
