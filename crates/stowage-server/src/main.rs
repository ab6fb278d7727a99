#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod handler;
mod server;
mod state;

use std::process;

use anyhow::Context;
use axum::Router;
use stowage_s3::ObjectOperations;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Cli, ServerConfig};
use crate::state::AppState;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "stowage_server::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "stowage_server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "stowage_server::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate().context("invalid configuration")?;

    let connection = cli
        .store
        .connection_config()
        .context("invalid object store configuration")?;

    let state = AppState::new(
        ObjectOperations::new(connection),
        cli.store.upload_prefix.clone(),
    );
    let router = create_router(state, &cli.server);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Request timeout (outermost) - terminates requests that run too long
/// 2. Tracing - per-request spans
/// 3. Routes (innermost) - actual request handlers
fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    handler::routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(server_config.request_timeout()))
}
