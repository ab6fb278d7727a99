//! Object store connection configuration.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result as AnyhowResult};
use clap::Args;
use serde::{Deserialize, Serialize};
use stowage_s3::{ConnectionConfig, StorageCredentials};
use url::Url;

use crate::TRACING_TARGET_CONFIG;

/// Object store connection configuration.
///
/// Carries everything needed to reach the S3-compatible store backing the
/// gateway, plus the key prefix uploaded objects are stored under.
///
/// # Environment Variables
///
/// All configuration options can be set via environment variables:
/// - `STOWAGE_ENDPOINT` - Object store endpoint URL (default: http://localhost:9000)
/// - `OSS_ACCESS_KEY_ID` - Access key identifier
/// - `OSS_ACCESS_KEY_SECRET` - Secret access key
/// - `OSS_BUCKET` - Bucket all operations are scoped to
/// - `STOWAGE_UPLOAD_PREFIX` - Key prefix for uploaded objects (default: uploads/)
/// - `STOWAGE_VIRTUAL_HOST` - Virtual-host-style addressing (default: true)
/// - `STOWAGE_CONNECT_TIMEOUT` - Connect timeout in seconds (default: 30)
/// - `STOWAGE_REQUEST_TIMEOUT` - Per-request timeout in seconds (default: 300)
#[derive(Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct StoreConfig {
    /// Object store endpoint URL.
    #[arg(long, env = "STOWAGE_ENDPOINT", default_value = "http://localhost:9000")]
    pub endpoint: String,

    /// Access key identifier used to sign requests.
    #[arg(long, env = "OSS_ACCESS_KEY_ID", default_value = "")]
    pub access_key_id: String,

    /// Secret access key used to sign requests.
    #[arg(long, env = "OSS_ACCESS_KEY_SECRET", default_value = "")]
    #[serde(skip_serializing)]
    pub access_key_secret: String,

    /// Bucket all gateway operations are scoped to.
    #[arg(long, env = "OSS_BUCKET", default_value = "")]
    pub bucket: String,

    /// Key prefix uploaded objects are stored under.
    ///
    /// The prefix is concatenated verbatim with the generated object name,
    /// so include a trailing slash for directory-style layouts.
    #[arg(long, env = "STOWAGE_UPLOAD_PREFIX", default_value = "uploads/")]
    pub upload_prefix: String,

    /// Whether to use virtual-host-style addressing (bucket in the hostname).
    ///
    /// Disable for stores that only support path-style addressing, such as a
    /// local MinIO instance.
    #[arg(long, env = "STOWAGE_VIRTUAL_HOST", default_value_t = true, action = clap::ArgAction::Set)]
    pub support_virtual_host: bool,

    /// Connect timeout in seconds for object store calls.
    #[arg(long, env = "STOWAGE_CONNECT_TIMEOUT", default_value_t = 30)]
    pub connect_timeout_secs: u64,

    /// Per-request timeout in seconds for object store calls.
    #[arg(long, env = "STOWAGE_REQUEST_TIMEOUT", default_value_t = 300)]
    pub request_timeout_secs: u64,
}

impl StoreConfig {
    /// Builds the typed connection configuration for the storage crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid http(s) URL or any
    /// required field is empty.
    pub fn connection_config(&self) -> AnyhowResult<ConnectionConfig> {
        let endpoint = Url::parse(&self.endpoint)
            .with_context(|| format!("invalid endpoint URL '{}'", self.endpoint))?;

        let config = ConnectionConfig::new(endpoint, self.credentials(), &self.bucket)?
            .with_support_virtual_host(self.support_virtual_host)
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs));

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration without constructing a client.
    pub fn validate(&self) -> AnyhowResult<()> {
        self.connection_config().map(|_| ())
    }

    /// Logs store configuration details at startup (credentials masked).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            endpoint = %self.endpoint,
            bucket = %self.bucket,
            upload_prefix = %self.upload_prefix,
            access_key = %self.credentials().access_key_masked(),
            virtual_host = self.support_virtual_host,
            connect_timeout_secs = self.connect_timeout_secs,
            request_timeout_secs = self.request_timeout_secs,
            "Object store configured"
        );
    }

    fn credentials(&self) -> StorageCredentials {
        StorageCredentials::new(&self.access_key_id, &self.access_key_secret)
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.credentials().access_key_masked())
            .field("access_key_secret", &"***")
            .field("bucket", &self.bucket)
            .field("upload_prefix", &self.upload_prefix)
            .field("support_virtual_host", &self.support_virtual_host)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
