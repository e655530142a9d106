//! The caller's question.

use std::fmt;
use thiserror::Error;

/// A question to forward to the assistant.
///
/// Only absence and the empty string are rejected. Length and encoding are
/// left to the hosted service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

/// Reasons a question cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question is required")]
    Missing,
}

impl Question {
    /// Accepts an optional raw question from a request body.
    pub fn parse(raw: Option<String>) -> Result<Self, QuestionError> {
        match raw {
            Some(text) if !text.is_empty() => Ok(Self(text)),
            _ => Err(QuestionError::Missing),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
