//! Thread messages.

use serde::{Deserialize, Serialize};

/// Author of a thread message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One content block of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    /// Markdown text written by the user or the assistant.
    Text { value: String },
    /// Any non-text block (images, files), identified by its type tag.
    Other { kind: String },
}

impl MessageContent {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Returns the text value if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { value } => Some(value),
            Self::Other { .. } => None,
        }
    }

    /// Type tag of the block, as the service names it.
    pub fn kind(&self) -> &str {
        match self {
            Self::Text { .. } => "text",
            Self::Other { kind } => kind,
        }
    }
}

/// A message within a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMessage {
    pub role: MessageRole,
    pub content: Vec<MessageContent>,
}

impl ThreadMessage {
    /// Creates an assistant message with a single text block.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: vec![MessageContent::text(text)],
        }
    }

    /// Creates a user message with a single text block.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: vec![MessageContent::text(text)],
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }

    /// First content block, if any.
    pub fn first_content(&self) -> Option<&MessageContent> {
        self.content.first()
    }
}
