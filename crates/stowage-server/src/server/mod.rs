//! HTTP server startup and lifecycle management.
//!
//! This module provides the server entry point with graceful shutdown on
//! Ctrl+C and SIGTERM, plus enhanced error reporting for bind and runtime
//! failures.

/// Tracing target for server startup events.
pub const TRACING_TARGET_STARTUP: &str = "stowage_server::server::startup";

/// Tracing target for server shutdown events.
pub const TRACING_TARGET_SHUTDOWN: &str = "stowage_server::server::shutdown";

mod error;
mod http_server;
mod shutdown;

pub use error::{Result, ServerError};
use http_server::serve_http;
use shutdown::shutdown_signal;

use axum::Router;

use crate::config::ServerConfig;

/// Starts the HTTP server with graceful shutdown handling.
///
/// # Errors
///
/// Returns an error if:
/// - Server configuration is invalid
/// - Cannot bind to the specified address/port
/// - Server encounters a fatal error during operation
pub async fn serve(app: Router, config: ServerConfig) -> Result<()> {
    serve_http(app, config).await
}
