//! Application handlers.
//!
//! Command handlers that orchestrate calls to the ports.

pub mod ask;

pub use ask::{
    Answer, AskHandlerConfig, AskQuestionCommand, AskQuestionError, AskQuestionHandler,
    StartedRun,
};
