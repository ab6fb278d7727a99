//! Object listing summaries.
//!
//! This module provides the read-only description of a stored object as it
//! appears in listing output.

use aws_sdk_s3::types::Object;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Summary of one stored object, produced by a listing call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// Full object key.
    pub key: String,
    /// Bucket holding the object.
    pub bucket_name: String,
    /// Object size in bytes.
    pub size_bytes: u64,
    /// Last modified timestamp.
    pub last_modified: Timestamp,
}

impl ObjectSummary {
    /// Creates a new object summary.
    pub fn new(
        key: impl Into<String>,
        bucket_name: impl Into<String>,
        size_bytes: u64,
        last_modified: Timestamp,
    ) -> Self {
        Self {
            key: key.into(),
            bucket_name: bucket_name.into(),
            size_bytes,
            last_modified,
        }
    }

    /// Builds a summary from one listing entry.
    pub(crate) fn from_object(bucket_name: &str, object: &Object) -> Self {
        let key = object.key().unwrap_or_default().to_string();
        let size_bytes = object.size().unwrap_or(0).max(0) as u64;
        let last_modified = object
            .last_modified()
            .and_then(|modified| Timestamp::from_second(modified.secs()).ok())
            .unwrap_or_else(Timestamp::now);

        Self {
            key,
            bucket_name: bucket_name.to_string(),
            size_bytes,
            last_modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::primitives::DateTime;

    use super::*;

    #[test]
    fn test_from_listing_entry() {
        let object = Object::builder()
            .key("reports/2024/summary.txt")
            .size(2048)
            .last_modified(DateTime::from_secs(1_700_000_000))
            .build();

        let summary = ObjectSummary::from_object("artifacts", &object);
        assert_eq!(summary.key, "reports/2024/summary.txt");
        assert_eq!(summary.bucket_name, "artifacts");
        assert_eq!(summary.size_bytes, 2048);
        assert_eq!(summary.last_modified.as_second(), 1_700_000_000);
    }

    #[test]
    fn test_from_sparse_listing_entry() {
        let object = Object::builder().key("reports/empty.txt").build();

        let summary = ObjectSummary::from_object("artifacts", &object);
        assert_eq!(summary.key, "reports/empty.txt");
        assert_eq!(summary.size_bytes, 0);
    }
}
