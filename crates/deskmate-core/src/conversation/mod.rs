//! Conversation domain types.

mod model;

pub use model::{
    ChatMessage, MAX_MESSAGES, MAX_MESSAGE_AGE_MS, MessageRole, TranscriptSnapshot,
    sanitize_content,
};
