//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod monitors;
mod objects;
mod request;
mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::state::AppState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .merge(monitors::routes())
        .merge(objects::routes())
        .fallback(handler)
        .with_state(state)
}

#[cfg(test)]
mod test {
    use axum_test::TestServer;
    use stowage_s3::{ConnectionConfig, ObjectOperations, StorageCredentials};
    use url::Url;

    use crate::handler::routes;
    use crate::state::AppState;

    /// Returns state wired to a local placeholder store.
    ///
    /// Requests that reach the store would fail against this endpoint, so
    /// tests built on it only exercise paths that reject before any call.
    pub fn test_state() -> anyhow::Result<AppState> {
        let endpoint = Url::parse("http://localhost:9000")?;
        let credentials = StorageCredentials::new("test-access-key", "test-secret-key");
        let config = ConnectionConfig::new(endpoint, credentials, "stowage-test")?;

        Ok(AppState::new(
            ObjectOperations::new(config),
            "uploads/".to_string(),
        ))
    }

    /// Returns a new [`TestServer`] with the default router and state.
    pub fn create_test_server() -> anyhow::Result<TestServer> {
        let app = routes(test_state()?);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_fall_back_to_not_found() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/nonexistent").await;
        response.assert_status_not_found();

        Ok(())
    }
}
