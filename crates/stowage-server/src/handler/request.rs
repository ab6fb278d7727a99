//! HTTP request types for the object gateway.

use serde::{Deserialize, Serialize};

/// Query parameters addressing a single object.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyParams {
    /// Full object key, including any path prefix.
    pub key: String,
}

/// Query parameters for changing an object's access policy.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAclParams {
    /// Full object key, including any path prefix.
    pub key: String,
    /// Requested access policy name.
    ///
    /// Kept as a raw string so unknown values can be rejected with a
    /// listing of the accepted ones instead of a generic parse failure.
    pub policy: String,
}

/// Query parameters for generating a presigned download URL.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignParams {
    /// Full object key, including any path prefix.
    pub key: String,
    /// Validity window in seconds.
    pub ttl_seconds: Option<u64>,
}

impl PresignParams {
    /// Default URL validity window.
    const DEFAULT_TTL_SECONDS: u64 = 900;

    /// Returns the validity window in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds.unwrap_or(Self::DEFAULT_TTL_SECONDS)
    }
}

/// Query parameters for listing objects.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Key prefix to filter by.
    pub prefix: Option<String>,
    /// Maximum number of objects per page.
    pub max_keys: Option<i32>,
    /// Continuation marker from a previous page.
    pub marker: Option<String>,
}

impl ListParams {
    /// Returns the key prefix to filter by.
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or_default()
    }

    /// Returns the continuation marker, if any.
    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }
}
