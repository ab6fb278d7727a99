//! System health monitoring and status check handlers.

use axum::Json;
use axum::Router;
use axum::routing::get;

use crate::handler::response::HealthResponse;
use crate::state::AppState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "stowage_server::handler::monitors";

#[tracing::instrument(skip_all)]
async fn health_status() -> Json<HealthResponse> {
    tracing::debug!(
        target: TRACING_TARGET,
        "Health status check requested"
    );

    // No dependency probing: the gateway is stateless and the object store
    // is reached lazily per request, so liveness is all there is to report.
    Json(HealthResponse {
        name: env!("CARGO_PKG_NAME").to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        status: "ok".to_owned(),
    })
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use crate::handler::test::create_test_server;

    use super::*;

    #[tokio::test]
    async fn test_health_status_endpoint() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/health").await;
        response.assert_status_success();

        let status_response = response.json::<HealthResponse>();
        assert_eq!(status_response.name, "stowage-server");
        assert_eq!(status_response.status, "ok");
        assert!(!status_response.version.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_health_endpoint_response_format() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/health").await;
        response.assert_status_success();

        let body = response.json::<serde_json::Value>();
        assert!(body.get("name").is_some());
        assert!(body.get("version").is_some());
        assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ok"));

        Ok(())
    }
}
