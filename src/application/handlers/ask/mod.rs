//! Ask command handler.
//!
//! Forwards a question to the hosted assistant and waits for its answer.

mod ask_question;

pub use ask_question::{
    // Command
    AskQuestionCommand,
    AskQuestionError,
    AskQuestionHandler,
    AskHandlerConfig,
    // Results
    Answer,
    StartedRun,
};
