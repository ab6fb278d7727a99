//! HTTP response types for the object gateway.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use stowage_s3::{AclPolicy, ObjectPage, ObjectSummary};

/// HTTP error response representation with security-conscious design.
///
/// This struct contains all the information needed to serialize an error
/// response, including the error name, message, HTTP status code, resource
/// information, and user-friendly messages.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier
    pub name: Cow<'a, str>,
    /// User-friendly error message safe for client display
    pub message: Cow<'a, str>,
    /// The resource that the error relates to (optional, set by handler)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// Internal context for debugging (optional, not exposed to client)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request could not be processed due to invalid data",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
    );
    // 5xx Server Errors
    pub const BAD_GATEWAY: Self = Self::new(
        "bad_gateway",
        "The object store could not fulfill the request",
        StatusCode::BAD_GATEWAY,
    );
    pub const GATEWAY_TIMEOUT: Self = Self::new(
        "gateway_timeout",
        "The object store took too long to respond",
        StatusCode::GATEWAY_TIMEOUT,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            context: None,
            status,
        }
    }

    /// Creates a new error response with custom resource.
    /// If a resource already exists, it merges them with a separator.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let new_resource = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{}/{}", existing, new_resource)),
            None => new_resource,
        });
        self
    }

    /// Creates a new error response with custom message.
    /// Appends the new message to the existing message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        let new_message = message.into();
        self.message = Cow::Owned(format!("{}. {}", self.message, new_message));
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Service health status response.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service name from the build manifest.
    pub name: String,
    /// Service version from the build manifest.
    pub version: String,
    /// Overall service status.
    pub status: String,
}

/// Response for a completed upload.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Object key the content was stored under.
    pub key: String,
    /// Stored size in bytes.
    pub size_bytes: u64,
    /// ETag reported by the store, when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Response for a delete request.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    /// Object key the delete was issued for.
    pub key: String,
    /// Whether the object existed and was removed.
    pub deleted: bool,
}

/// Response carrying an object's access policy.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclResponse {
    /// Object key the policy applies to.
    pub key: String,
    /// Effective access policy.
    pub policy: AclPolicy,
}

/// Response carrying a presigned download URL.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlResponse {
    /// Object key the URL grants access to.
    pub key: String,
    /// Signed URL embedding the expiry.
    pub url: String,
    /// Validity window in seconds.
    pub expires_in_seconds: u64,
}

/// One stored object as it appears in listing output.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEntry {
    /// Full object key.
    pub key: String,
    /// Object size in bytes.
    pub size_bytes: u64,
    /// Last modified timestamp.
    pub last_modified: Timestamp,
}

impl ObjectEntry {
    /// Creates an entry from a listing summary.
    pub fn from_summary(summary: ObjectSummary) -> Self {
        Self {
            key: summary.key,
            size_bytes: summary.size_bytes,
            last_modified: summary.last_modified,
        }
    }
}

/// Paginated response for object listing.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectsPage {
    /// The objects in this page.
    pub items: Vec<ObjectEntry>,
    /// Whether there are more objects after this page.
    pub has_more: bool,
    /// Marker to fetch the next page, if there are more objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_marker: Option<String>,
}

impl ObjectsPage {
    /// Creates an ObjectsPage from a storage listing page.
    pub fn from_page(page: ObjectPage) -> Self {
        Self {
            items: page.items.into_iter().map(ObjectEntry::from_summary).collect(),
            has_more: page.has_more,
            next_marker: page.next_marker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_merging_resource() {
        let response = ErrorResponse::NOT_FOUND
            .with_resource("bucket")
            .with_resource("reports/summary.txt");

        assert_eq!(
            response.resource.as_deref(),
            Some("bucket/reports/summary.txt")
        );
    }

    #[test]
    fn error_response_merging_message() {
        let response = ErrorResponse::BAD_REQUEST
            .with_message("Invalid format")
            .with_message("Missing required field");

        assert_eq!(
            &response.message,
            "The request could not be processed due to invalid data. Invalid format. Missing required field"
        );
    }

    #[test]
    fn error_response_merging_context() {
        let response = ErrorResponse::BAD_GATEWAY
            .with_context("Connection refused")
            .with_context("Retry attempted 3 times");

        assert_eq!(
            response.context.as_deref(),
            Some("Connection refused; Retry attempted 3 times")
        );
    }

    #[test]
    fn error_response_serialization() {
        let response = ErrorResponse::BAD_REQUEST
            .with_resource("test_resource")
            .with_message("Test message")
            .with_context("Test context");

        let json = serde_json::to_string(&response).unwrap();

        // Should contain all serialized fields
        assert!(json.contains("name"));
        assert!(json.contains("message"));
        assert!(json.contains("resource"));
        assert!(json.contains("context"));

        // Should not contain status code (marked as skip)
        assert!(!json.contains("status"));
    }

    #[test]
    fn upload_response_serializes_camel_case() {
        let response = UploadResponse {
            key: "uploads/abc.png".to_string(),
            size_bytes: 10,
            etag: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("sizeBytes"));
        assert!(!json.contains("etag"));
    }

    #[test]
    fn objects_page_from_storage_page() {
        let page = ObjectPage {
            items: vec![ObjectSummary::new(
                "uploads/a.txt",
                "artifacts",
                42,
                Timestamp::UNIX_EPOCH,
            )],
            next_marker: Some("uploads/a.txt".to_string()),
            has_more: true,
        };

        let response = ObjectsPage::from_page(page);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].key, "uploads/a.txt");
        assert_eq!(response.items[0].size_bytes, 42);
        assert!(response.has_more);
        assert_eq!(response.next_marker.as_deref(), Some("uploads/a.txt"));
    }
}
