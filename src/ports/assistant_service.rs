//! Assistant Service Port - Interface to the hosted assistant API.
//!
//! The relay delegates all conversational work to an external service that
//! owns assistants, threads, runs and messages. This port exposes exactly the
//! six calls a question/answer exchange needs, so the request flow can be
//! exercised without network access.
//!
//! # Example
//!
//! ```ignore
//! let assistants = service.list_assistants().await?;
//! let thread = service.create_thread().await?;
//! service.add_user_message(&thread, "¿Qué es Rust?").await?;
//! let run = service.create_run(&thread, &assistants[0]).await?;
//! let run = service.retrieve_run(&thread, &run.id).await?;
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::assistant::{AssistantId, Run, RunId, ThreadId, ThreadMessage};

/// Port for the hosted assistant service.
///
/// Implementations translate between the provider's wire format and the
/// domain types. They never retry; every error is reported to the caller.
#[async_trait]
pub trait AssistantService: Send + Sync {
    /// Lists the configured assistants in the order the service returns them.
    async fn list_assistants(&self) -> Result<Vec<AssistantId>, AssistantServiceError>;

    /// Creates an empty conversation thread.
    async fn create_thread(&self) -> Result<ThreadId, AssistantServiceError>;

    /// Appends a message with role `user` to a thread.
    async fn add_user_message(
        &self,
        thread_id: &ThreadId,
        content: &str,
    ) -> Result<(), AssistantServiceError>;

    /// Starts a run of an assistant over a thread.
    async fn create_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<Run, AssistantServiceError>;

    /// Fetches the current state of a run.
    async fn retrieve_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<Run, AssistantServiceError>;

    /// Lists the messages of a thread in the service's default order.
    async fn list_messages(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantServiceError>;
}

/// Errors reported by an assistant service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantServiceError {
    /// API key missing, invalid or revoked.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the service.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until a retry would be accepted.
        retry_after_secs: u32,
    },

    /// Referenced resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Request rejected as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Service-side failure.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Single HTTP call exceeded its timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl AssistantServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            AssistantServiceError::RateLimited { retry_after_secs: 20 }.to_string(),
            "rate limited: retry after 20s"
        );
        assert_eq!(
            AssistantServiceError::network("connection reset").to_string(),
            "network error: connection reset"
        );
        assert_eq!(
            AssistantServiceError::Timeout { timeout_secs: 60 }.to_string(),
            "request timed out after 60s"
        );
    }

    #[test]
    fn port_is_object_safe() {
        fn _assert(_: &dyn AssistantService) {}
    }
}
