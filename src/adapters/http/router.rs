//! Application router assembly.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::ask::{ask_routes, AskAppState};
use super::health::health_routes;

/// Builds the complete HTTP application.
///
/// # Routes
/// - `POST /ask` - in the configured delivery mode
/// - `GET /health` - liveness probe
pub fn app_router(state: AskAppState, server: &ServerConfig) -> Router {
    let mut router = Router::new()
        .merge(ask_routes(server.delivery))
        .merge(health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let origins = allowed_origins(&server.cors_origins_list());
    if !origins.is_empty() {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    router
}

/// Parses configured origins, skipping invalid entries.
fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", origin, e);
                None
            }
        })
        .collect()
}
