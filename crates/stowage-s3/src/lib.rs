#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![allow(clippy::result_large_err, clippy::large_enum_variant)]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "stowage_s3::client";
pub const TRACING_TARGET_SESSION: &str = "stowage_s3::session";
pub const TRACING_TARGET_OBJECTS: &str = "stowage_s3::objects";

pub mod client;
pub mod operations;
pub mod types;

pub use aws_sdk_s3::primitives::ByteStream;

// Re-export for convenience
pub use crate::client::{ConnectionConfig, StorageCredentials, StorageSession};
pub use crate::operations::{DownloadResult, ObjectOperations, UploadResult};
pub use crate::types::{AclPolicy, ObjectPage, ObjectSummary};

/// Error type for object storage operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    ///
    /// This includes empty credentials, an empty bucket name, or an
    /// unusable endpoint. Configuration errors are fatal at startup and
    /// are never produced by a remote call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument supplied by the caller.
    ///
    /// This covers unsupported ACL policy values, non-positive listing
    /// limits, and malformed presign expiries. Such requests are rejected
    /// before any remote call is made and must not be retried unchanged.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Resource not found.
    ///
    /// The referenced object is absent from the bucket. Absence is a normal
    /// outcome: `exists` returns `false`, `download` returns `None`, and
    /// `delete` returns `false`; only the ACL and presign operations signal
    /// it through this variant.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Transient network error that may succeed on retry.
    ///
    /// This includes connection resets, DNS resolution failures, and
    /// malformed responses from the service.
    #[error("Transient network error: {0} (retryable)")]
    TransientNetwork(String),

    /// Operation timeout error.
    ///
    /// This occurs when an operation takes longer than the configured
    /// timeout.
    #[error("Operation timeout after {timeout:?}")]
    Timeout {
        /// The timeout duration that was exceeded.
        timeout: std::time::Duration,
    },

    /// Service-reported failure unrelated to object existence.
    ///
    /// Auth failures, throttling, and 5xx responses land here. Retries are
    /// the caller's policy; this crate performs none.
    #[error("Service error: {message} (status: {status_code})")]
    ServiceError {
        /// Error message from the service.
        message: String,
        /// HTTP status code of the response.
        status_code: u16,
    },

    /// I/O operation failed.
    ///
    /// This includes failures while streaming object bytes to or from the
    /// service, such as a connection dropped mid-transfer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns whether this error indicates a configuration issue.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Returns whether this error indicates an invalid caller argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Returns whether this error indicates a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Returns whether this error should trigger an automatic retry.
    ///
    /// Only transient errors that are likely to succeed on retry should return true.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::TransientNetwork(_) => true,
            Error::Timeout { .. } => true,
            Error::ServiceError { status_code, .. } => {
                // Retry on 5xx errors (server issues) but not 4xx (client issues)
                *status_code >= 500 && *status_code < 600
            }
            Error::Io(_) => true,
            // Non-retryable errors
            Error::Config(_) => false,
            Error::InvalidArgument(_) => false,
            Error::NotFound(_) => false,
        }
    }

    /// Returns the recommended delay before retrying this operation.
    ///
    /// Returns `None` if the error is not retryable or no specific delay is recommended.
    pub fn retry_delay(&self) -> Option<std::time::Duration> {
        match self {
            Error::TransientNetwork(_) => Some(std::time::Duration::from_secs(1)),
            Error::Timeout { .. } => Some(std::time::Duration::from_millis(500)),
            Error::ServiceError { status_code, .. } if *status_code >= 500 => {
                Some(std::time::Duration::from_secs(2))
            }
            Error::Io(_) => Some(std::time::Duration::from_millis(200)),
            _ => None,
        }
    }

    /// Returns the severity level of this error for logging purposes.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Error::Config(_) => ErrorSeverity::Critical,
            Error::InvalidArgument(_) => ErrorSeverity::Medium,
            Error::NotFound(_) => ErrorSeverity::Low,
            Error::TransientNetwork(_) => ErrorSeverity::Low,
            Error::Timeout { .. } => ErrorSeverity::Low,
            Error::ServiceError { status_code, .. } => {
                if *status_code == 401 || *status_code == 403 {
                    ErrorSeverity::High
                } else {
                    ErrorSeverity::Medium
                }
            }
            Error::Io(_) => ErrorSeverity::Low,
        }
    }
}

/// Error severity levels for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical errors that require immediate attention.
    Critical,
    /// High-priority errors that should be investigated quickly.
    High,
    /// Medium-priority errors that should be monitored.
    Medium,
    /// Low-priority errors that are expected during normal operation.
    Low,
}

/// Specialized [`Result`] type for object storage operations.
///
/// This is a convenience alias that uses [`Error`] as the error type,
/// making operation signatures cleaner and more consistent.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_normal_outcome() {
        let err = Error::NotFound("reports/missing.txt".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_retryable_classification() {
        assert!(Error::TransientNetwork("reset".to_string()).is_retryable());
        assert!(
            Error::Timeout {
                timeout: std::time::Duration::from_secs(30)
            }
            .is_retryable()
        );
        assert!(
            Error::ServiceError {
                message: "unavailable".to_string(),
                status_code: 503,
            }
            .is_retryable()
        );

        assert!(
            !Error::ServiceError {
                message: "denied".to_string(),
                status_code: 403,
            }
            .is_retryable()
        );
        assert!(!Error::Config("empty bucket".to_string()).is_retryable());
        assert!(!Error::InvalidArgument("bad policy".to_string()).is_retryable());
    }

    #[test]
    fn test_retry_delay_only_for_retryable() {
        assert!(
            Error::TransientNetwork("reset".to_string())
                .retry_delay()
                .is_some()
        );
        assert!(
            Error::ServiceError {
                message: "denied".to_string(),
                status_code: 403,
            }
            .retry_delay()
            .is_none()
        );
        assert!(
            Error::NotFound("missing".to_string())
                .retry_delay()
                .is_none()
        );
    }

    #[test]
    fn test_auth_failures_rank_high() {
        let err = Error::ServiceError {
            message: "signature mismatch".to_string(),
            status_code: 403,
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
