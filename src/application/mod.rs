//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates the request flow and coordinates between ports.

pub mod handlers;

pub use handlers::{
    Answer, AskHandlerConfig, AskQuestionCommand, AskQuestionError, AskQuestionHandler,
    StartedRun,
};
