//! Gateway configuration management.
//!
//! This module defines the complete configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig  # Host, port, timeouts
//! └── store: StoreConfig    # Object store endpoint, credentials, bucket
//! ```
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Configure the object store and server
//! stowage-server --endpoint http://localhost:9000 --bucket artifacts --port 8080
//!
//! # Or via environment variables
//! STOWAGE_ENDPOINT=http://localhost:9000 OSS_BUCKET=artifacts PORT=8080 stowage-server
//! ```

mod server;
mod store;

use std::process;

use anyhow::Context;
use clap::Parser;
pub use server::ServerConfig;
pub use store::StoreConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_STARTUP;

/// Complete gateway configuration.
///
/// Combines the two configuration groups for the stowage gateway:
/// - [`ServerConfig`]: Network binding and lifecycle timeouts
/// - [`StoreConfig`]: Object store connection and upload settings
#[derive(Debug, Clone, Parser)]
#[command(name = "stowage-server")]
#[command(about = "HTTP gateway for S3-compatible object storage")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Object store connection configuration.
    #[clap(flatten)]
    pub store: StoreConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// This is the preferred way to initialize the configuration as it ensures
    /// .env files are loaded before clap parses arguments, allowing environment
    /// variables from .env to be used as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.store
            .validate()
            .context("invalid object store configuration")?;
        Ok(())
    }

    /// Logs configuration at startup (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.store.log();
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_args() {
        let cli = Cli::try_parse_from([
            "stowage-server",
            "--access-key-id",
            "access",
            "--access-key-secret",
            "secret",
            "--bucket",
            "artifacts",
        ])
        .unwrap();

        assert!(cli.validate().is_ok());
        assert_eq!(cli.store.bucket, "artifacts");
        assert_eq!(cli.server.port, 3000);
    }

    #[test]
    fn parse_overrides() {
        let cli = Cli::try_parse_from([
            "stowage-server",
            "--endpoint",
            "https://oss-cn-beijing.aliyuncs.com",
            "--access-key-id",
            "access",
            "--access-key-secret",
            "secret",
            "--bucket",
            "artifacts",
            "--port",
            "8080",
            "--upload-prefix",
            "incoming/",
        ])
        .unwrap();

        assert_eq!(cli.server.port, 8080);
        assert_eq!(cli.store.endpoint, "https://oss-cn-beijing.aliyuncs.com");
        assert_eq!(cli.store.upload_prefix, "incoming/");
    }
}
