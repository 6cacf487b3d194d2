//! Conversation message types.
//!
//! A transcript is the ordered message history for one help category,
//! persisted as a whole-snapshot unit with a write timestamp. The snapshot
//! either survives intact or is discarded intact; individual messages are
//! never aged out one by one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of messages retained per transcript.
pub const MAX_MESSAGES: usize = 50;

/// Age after which a persisted snapshot is discarded at load time.
pub const MAX_MESSAGE_AGE_MS: i64 = 24 * 60 * 60 * 1000;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the assistant.
    Assistant,
}

/// A single message in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message identifier. Client-assigned for optimistic user messages,
    /// later reconciled with the server-assigned id.
    pub id: String,
    /// Sanitized message text.
    pub content: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
    /// Help category this message belongs to.
    pub category: String,
}

impl ChatMessage {
    /// Creates a user message with a fresh client-assigned id and sanitized
    /// content.
    pub fn user(content: &str, category: &str, timestamp: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: sanitize_content(content),
            role: MessageRole::User,
            timestamp: timestamp.into(),
            category: category.to_string(),
        }
    }

    /// Creates an assistant message with sanitized content.
    pub fn assistant(
        id: impl Into<String>,
        content: &str,
        category: &str,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: sanitize_content(content),
            role: MessageRole::Assistant,
            timestamp: timestamp.into(),
            category: category.to_string(),
        }
    }
}

/// The persisted unit for one category's transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSnapshot {
    /// Messages in insertion order, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Epoch milliseconds at which this snapshot was written.
    pub timestamp: i64,
}

impl TranscriptSnapshot {
    /// True when the snapshot's write timestamp is older than
    /// [`MAX_MESSAGE_AGE_MS`].
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms - self.timestamp > MAX_MESSAGE_AGE_MS
    }
}

/// Strips angle brackets from message content before it is stored or sent.
pub fn sanitize_content(content: &str) -> String {
    content.replace(['<', '>'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_angle_brackets() {
        assert_eq!(
            sanitize_content("<script>alert('x')</script> hello"),
            "scriptalert('x')/script hello"
        );
        assert_eq!(sanitize_content("plain text"), "plain text");
    }

    #[test]
    fn test_user_message_gets_unique_ids() {
        let a = ChatMessage::user("hi", "billing", "2024-01-01T00:00:00Z");
        let b = ChatMessage::user("hi", "billing", "2024-01-01T00:00:00Z");
        assert_ne!(a.id, b.id);
        assert_eq!(a.role, MessageRole::User);
    }

    #[test]
    fn test_snapshot_expiry_is_whole_unit() {
        let snapshot = TranscriptSnapshot {
            messages: vec![ChatMessage::user("hello", "billing", "t")],
            timestamp: 0,
        };
        assert!(!snapshot.is_expired(MAX_MESSAGE_AGE_MS));
        assert!(snapshot.is_expired(MAX_MESSAGE_AGE_MS + 1));
    }

    #[test]
    fn test_role_round_trips_lowercase() {
        let message = ChatMessage::assistant("m-1", "answer", "billing", "t");
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));

        let parsed: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, message);
    }
}
