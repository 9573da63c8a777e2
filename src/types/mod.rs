//! Common types and error handling for the askdocs client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= Chat Types =============

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Message typed by the local user.
    User,
    /// Answer (or fallback text) from the backend answering service.
    Assistant,
}

/// A single turn in the chat transcript.
///
/// The transcript is append-only: messages are never mutated or removed
/// once added, and their order reflects the causal send/receive order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message body.
    pub text: String,
    /// Message author.
    pub sender: Sender,
    /// When the message was appended locally.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a user message stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
        }
    }

    /// Build an assistant message stamped with the current time.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
        }
    }
}

// ============= Error Types =============

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request never completed (DNS, connect, timeout, malformed URL).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered but signalled a failure, either through a non-2xx
    /// status or an `error` field in the response body.
    #[error("Server error: {0}")]
    Api(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Config error: {0}")]
    Config(String),

    /// Local I/O failure (terminal, file picker, file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Sender::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn message_constructors_set_sender() {
        assert_eq!(ChatMessage::user("hi").sender, Sender::User);
        assert_eq!(ChatMessage::assistant("hello").sender, Sender::Assistant);
    }
}
