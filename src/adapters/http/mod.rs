//! HTTP adapters - REST API implementations.

pub mod ask;
pub mod health;
mod router;

pub use ask::{ask_routes, AskAppState};
pub use router::app_router;
