//! HTTP handlers for the ask endpoint.
//!
//! These handlers connect the Axum route to the AskQuestion command handler.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::Instrument;
use uuid::Uuid;

use crate::application::handlers::ask::{
    AskHandlerConfig, AskQuestionCommand, AskQuestionError, AskQuestionHandler,
};
use crate::ports::{AssistantService, MarkdownRenderer};

use super::dto::{messages, AskRequest, AskResponse, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for the ask endpoint.
///
/// Cloned for each request; holds no per-request data.
#[derive(Clone)]
pub struct AskAppState {
    pub assistant_service: Arc<dyn AssistantService>,
    pub renderer: Arc<dyn MarkdownRenderer>,
    pub handler_config: AskHandlerConfig,
}

impl AskAppState {
    pub fn new(
        assistant_service: Arc<dyn AssistantService>,
        renderer: Arc<dyn MarkdownRenderer>,
        handler_config: AskHandlerConfig,
    ) -> Self {
        Self {
            assistant_service,
            renderer,
            handler_config,
        }
    }

    /// Create the command handler on demand from the shared state.
    pub fn ask_handler(&self) -> AskQuestionHandler {
        AskQuestionHandler::with_config(
            self.assistant_service.clone(),
            self.renderer.clone(),
            self.handler_config.clone(),
        )
    }
}

/// Span wrapping one `/ask` request.
pub(super) fn ask_span() -> tracing::Span {
    tracing::info_span!("ask", request_id = %Uuid::new_v4())
}

/// Builds the command from the request body.
///
/// A body that is not a JSON object with a string `question` counts as a
/// missing question.
pub(super) fn command_from_body(
    body: Result<Json<AskRequest>, JsonRejection>,
) -> AskQuestionCommand {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable ask body");
            AskRequest::default()
        }
    };

    AskQuestionCommand {
        question: request.question,
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /ask - Answer a question in a single JSON response.
///
/// The exchange keeps running to a terminal run state even if the client
/// goes away; its answer is then discarded.
pub async fn ask(
    State(state): State<AskAppState>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, AskApiError> {
    let cmd = command_from_body(body);
    let handler = state.ask_handler();

    let exchange = tokio::spawn(async move { handler.handle(cmd).await }.instrument(ask_span()));
    let answer = exchange
        .await
        .map_err(|e| AskApiError::Internal(format!("ask task failed: {}", e)))??;

    Ok(Json(AskResponse {
        response: answer.html,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts command errors to HTTP responses.
#[derive(Debug)]
pub enum AskApiError {
    MissingQuestion,
    NoAssistants,
    NoResponse,
    RunFailed,
    Internal(String),
}

impl From<AskQuestionError> for AskApiError {
    fn from(err: AskQuestionError) -> Self {
        match err {
            AskQuestionError::MissingQuestion => AskApiError::MissingQuestion,
            AskQuestionError::NoAssistants => AskApiError::NoAssistants,
            AskQuestionError::NoAssistantResponse => AskApiError::NoResponse,
            AskQuestionError::RunFailed { .. } => AskApiError::RunFailed,
            AskQuestionError::UnsupportedContent(_) | AskQuestionError::Service(_) => {
                AskApiError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for AskApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AskApiError::MissingQuestion => (StatusCode::BAD_REQUEST, messages::MISSING_QUESTION),
            AskApiError::NoAssistants => (StatusCode::NOT_FOUND, messages::NO_ASSISTANTS),
            AskApiError::NoResponse => (StatusCode::NOT_FOUND, messages::NO_RESPONSE),
            AskApiError::RunFailed => (StatusCode::INTERNAL_SERVER_ERROR, messages::RUN_FAILED),
            AskApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
