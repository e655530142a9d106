//! Liveness endpoint.

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

/// GET /health - Report that the process is serving requests.
///
/// Does not contact the assistant service.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "assistant-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Creates the health route for any router state.
pub fn health_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health_check))
}
