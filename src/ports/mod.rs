//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the request flow and the outside world. Adapters implement these ports.
//!
//! - `AssistantService` - The hosted assistant API (assistants, threads, runs, messages)
//! - `MarkdownRenderer` - Markdown to HTML conversion of answers

mod assistant_service;
mod markdown_renderer;

pub use assistant_service::{AssistantService, AssistantServiceError};
pub use markdown_renderer::MarkdownRenderer;
