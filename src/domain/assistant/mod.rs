//! Assistant domain - value types for one question/answer exchange.
//!
//! All entities here are owned by the hosted assistant service. The relay
//! only holds transient references to them for the lifetime of a request:
//!
//! - `Question` - the caller's input, required and non-empty
//! - `AssistantId`, `ThreadId`, `RunId` - opaque external identifiers
//! - `Run` / `RunStatus` - an execution of an assistant over a thread
//! - `ThreadMessage` - a message in a thread, tagged with its role

mod ids;
mod message;
mod question;
mod run;

pub use ids::{AssistantId, RunId, ThreadId};
pub use message::{MessageContent, MessageRole, ThreadMessage};
pub use question::{Question, QuestionError};
pub use run::{Run, RunError, RunStatus};
