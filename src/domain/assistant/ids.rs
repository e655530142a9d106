//! Opaque identifiers issued by the hosted assistant service.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! external_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier returned by the service.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as sent on the wire.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

external_id! {
    /// Identifier of a configured assistant (e.g. `asst_abc123`).
    AssistantId
}

external_id! {
    /// Identifier of a conversation thread (e.g. `thread_abc123`).
    ThreadId
}

external_id! {
    /// Identifier of a run (e.g. `run_abc123`).
    RunId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_raw_identifier() {
        let id = ThreadId::new("thread_123");
        assert_eq!(id.to_string(), "thread_123");
        assert_eq!(id.as_str(), "thread_123");
    }

    #[test]
    fn serializes_transparently() {
        let id = AssistantId::from("asst_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"asst_1\"");

        let back: RunId = serde_json::from_str("\"run_9\"").unwrap();
        assert_eq!(back, RunId::new("run_9"));
    }
}
