//! Assistant service adapters.
//!
//! Implementations of the AssistantService port.
//!
//! ## Available Adapters
//!
//! - `OpenAIAssistantService` - OpenAI Assistants API (v2) over HTTPS
//! - `MockAssistantService` - Scripted mock for testing

mod mock_assistant_service;
mod openai_assistants;

pub use mock_assistant_service::{MockAssistantService, MockCall, MockOperation};
pub use openai_assistants::{OpenAIAssistantService, OpenAIAssistantsConfig};
