//! Assistant Relay - HTTP front for a hosted conversational assistant
//!
//! Accepts a question over HTTP, runs it through the first configured
//! assistant of the hosted service, and returns the answer rendered as HTML,
//! either as one JSON response or as a server-sent event stream.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod observability;
pub mod ports;
