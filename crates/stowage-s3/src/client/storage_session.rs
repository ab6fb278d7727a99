//! Per-operation storage sessions.
//!
//! A session is the connection context for exactly one operation: opened
//! from the shared [`ConnectionConfig`], used for one remote call or a short
//! checked sequence, and released when dropped. Sessions are never shared,
//! cached, or reused across operations.

use std::sync::Arc;
use std::time::Instant;

use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::timeout::TimeoutConfig;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use tracing::{instrument, trace};

use super::connection_config::ConnectionConfig;
use crate::{Error, TRACING_TARGET_SESSION};

/// Signing region supplied to the SDK.
///
/// Routing is fully determined by the explicit endpoint; the region only
/// participates in request signing.
const SIGNING_REGION: &str = "us-east-1";

/// Ephemeral connection handle bound to a [`ConnectionConfig`].
///
/// A session is exclusively owned by the single operation invocation that
/// opened it. Dropping the session releases the underlying connection
/// resources, so every exit path of the owning operation releases exactly
/// once by construction, on success and on failure alike.
pub struct StorageSession {
    client: Client,
    config: Arc<ConnectionConfig>,
    opened_at: Instant,
}

impl StorageSession {
    /// Opens a session for a single operation.
    ///
    /// This prepares a client for the configured endpoint without performing
    /// any network I/O; the first remote call establishes the actual
    /// connection.
    #[instrument(skip(config), target = TRACING_TARGET_SESSION, fields(endpoint = %config.endpoint_masked(), bucket = %config.bucket_name()))]
    pub fn open(config: Arc<ConnectionConfig>) -> Self {
        trace!(target: TRACING_TARGET_SESSION, "Opening storage session");

        let credentials = Credentials::from(config.credentials().clone());

        let timeouts = TimeoutConfig::builder()
            .connect_timeout(config.connect_timeout)
            .operation_timeout(config.request_timeout)
            .build();

        let sdk_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(config.endpoint().as_str())
            .region(Region::new(SIGNING_REGION))
            .credentials_provider(credentials)
            .force_path_style(!config.support_virtual_host)
            .timeout_config(timeouts)
            .retry_config(RetryConfig::disabled())
            .build();

        Self {
            client: Client::from_conf(sdk_config),
            config,
            opened_at: Instant::now(),
        }
    }

    /// Returns a reference to the inner client.
    #[inline]
    pub(crate) fn as_inner(&self) -> &Client {
        &self.client
    }

    /// Returns the bucket every call in this session is scoped to.
    #[inline]
    pub fn bucket_name(&self) -> &str {
        self.config.bucket_name()
    }

    /// Maps a failed SDK call onto the crate error taxonomy.
    pub(crate) fn map_error<E>(&self, err: SdkError<E>) -> Error
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    {
        match err {
            SdkError::ConstructionFailure(_) => {
                Error::InvalidArgument("Failed to construct the service request".to_string())
            }
            SdkError::TimeoutError(_) => Error::Timeout {
                timeout: self.config.request_timeout,
            },
            SdkError::DispatchFailure(failure) => {
                let message = failure
                    .as_connector_error()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "Failed to dispatch the request".to_string());

                if failure.is_timeout() {
                    Error::Timeout {
                        timeout: self.config.connect_timeout,
                    }
                } else if failure.is_io() {
                    Error::Io(std::io::Error::other(message))
                } else {
                    Error::TransientNetwork(message)
                }
            }
            SdkError::ResponseError(_) => {
                Error::TransientNetwork("Received a malformed service response".to_string())
            }
            SdkError::ServiceError(ctx) => {
                let status_code = ctx.raw().status().as_u16();
                let message = ctx
                    .err()
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| ctx.err().to_string());

                Error::ServiceError {
                    message,
                    status_code,
                }
            }
            other => Error::TransientNetwork(other.to_string()),
        }
    }
}

impl Drop for StorageSession {
    fn drop(&mut self) {
        trace!(
            target: TRACING_TARGET_SESSION,
            endpoint = %self.config.endpoint_masked(),
            elapsed = ?self.opened_at.elapsed(),
            "Storage session released"
        );
    }
}

impl std::fmt::Debug for StorageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageSession")
            .field("endpoint", &self.config.endpoint_masked())
            .field("bucket", &self.config.bucket_name())
            .field("secure", &self.config.is_secure())
            .field("access_key", &self.config.credentials().access_key_masked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::head_object::HeadObjectError;
    use url::Url;

    use super::*;
    use crate::StorageCredentials;

    fn test_session() -> StorageSession {
        let endpoint = Url::parse("http://localhost:9000").unwrap();
        let credentials = StorageCredentials::new("stowageadmin", "stowagesecret");
        let config = ConnectionConfig::new(endpoint, credentials, "artifacts").unwrap();
        StorageSession::open(Arc::new(config))
    }

    #[test]
    fn test_open_performs_no_io() {
        let session = test_session();
        assert_eq!(session.bucket_name(), "artifacts");
    }

    #[test]
    fn test_session_debug_masks_credentials() {
        let session = test_session();
        let debug_str = format!("{session:?}");

        assert!(debug_str.contains("StorageSession"));
        assert!(debug_str.contains("localhost:9000"));
        assert!(!debug_str.contains("stowageadmin"));
        assert!(!debug_str.contains("stowagesecret"));
    }

    #[test]
    fn test_timeout_error_mapping() {
        let session = test_session();
        let err: SdkError<HeadObjectError> = SdkError::timeout_error("deadline exceeded");

        let mapped = session.map_error(err);
        assert!(matches!(mapped, Error::Timeout { .. }));
        assert!(mapped.is_retryable());
    }

    #[test]
    fn test_construction_failure_mapping() {
        let session = test_session();
        let err: SdkError<HeadObjectError> = SdkError::construction_failure("bad request input");

        let mapped = session.map_error(err);
        assert!(mapped.is_invalid_argument());
    }
}
