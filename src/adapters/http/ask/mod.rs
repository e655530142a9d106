//! HTTP adapter for the ask endpoint.
//!
//! - `POST /ask` - Forward a question to the assistant and return its answer,
//!   either as one JSON body or as a server-sent event stream

pub mod dto;
pub mod handlers;
pub mod routes;
pub mod streaming;

pub use dto::{AskRequest, AskResponse, ErrorResponse, StreamFrame};
pub use handlers::{AskApiError, AskAppState};
pub use routes::ask_routes;
