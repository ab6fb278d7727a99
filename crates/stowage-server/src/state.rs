//! Shared application state for request handlers.

use stowage_s3::ObjectOperations;

/// State shared across all request handlers.
///
/// Cloning is cheap; the operation surface holds its configuration behind an
/// `Arc` and opens a fresh storage session per call.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Object operations scoped to the configured bucket.
    pub store: ObjectOperations,
    /// Key prefix uploaded objects are stored under.
    pub upload_prefix: String,
}

impl AppState {
    /// Creates the shared state from the operation surface and upload prefix.
    pub fn new(store: ObjectOperations, upload_prefix: String) -> Self {
        Self {
            store,
            upload_prefix,
        }
    }
}
