//! HTTP DTOs for the ask endpoint.
//!
//! The JSON shapes and the user-facing (Spanish) messages are part of the
//! public contract and must not change.

use serde::{Deserialize, Serialize};

use crate::domain::assistant::RunStatus;

/// Fixed client-facing error messages.
pub mod messages {
    pub const MISSING_QUESTION: &str = "La pregunta es obligatoria.";
    pub const NO_ASSISTANTS: &str = "No se encontraron asistentes.";
    pub const NO_RESPONSE: &str = "No se recibió respuesta del asistente.";
    pub const RUN_FAILED: &str = "La ejecución del asistente falló.";
    pub const INTERNAL: &str = "Ocurrió un error al procesar la solicitud.";
}

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /ask`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Successful synchronous answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    /// Answer rendered as HTML.
    pub response: String,
}

/// Error body shared by every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Payload of one server-sent event on the streaming endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StreamFrame {
    /// Intermediate run status, sent once per pending poll.
    Status { status: String },
    /// Final answer rendered as HTML.
    Response { response: String },
    /// Final error.
    Error { error: String },
}

impl StreamFrame {
    pub fn status(status: &RunStatus) -> Self {
        Self::Status {
            status: status.as_str().to_string(),
        }
    }

    pub fn response(html: impl Into<String>) -> Self {
        Self::Response {
            response: html.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}
