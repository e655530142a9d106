//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the request flow to external systems:
//! - `ai` - Hosted assistant service clients (OpenAI, mock)
//! - `document` - Markdown rendering
//! - `http` - Axum routes and handlers

pub mod ai;
pub mod document;
pub mod http;
