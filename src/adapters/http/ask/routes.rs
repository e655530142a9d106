//! Axum routes for the ask endpoint.

use axum::routing::{post, MethodRouter};
use axum::Router;

use crate::config::DeliveryMode;

use super::handlers::{ask, AskAppState};
use super::streaming::ask_stream;

/// Creates the ask route for the configured delivery mode.
///
/// - `POST /ask` - synchronous JSON answer, or a server-sent event stream
pub fn ask_routes(delivery: DeliveryMode) -> Router<AskAppState> {
    let handler: MethodRouter<AskAppState> = match delivery {
        DeliveryMode::Sync => post(ask),
        DeliveryMode::Stream => post(ask_stream),
    };

    Router::new().route("/ask", handler)
}
