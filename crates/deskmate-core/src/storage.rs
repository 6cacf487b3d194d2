//! Key-value store trait.
//!
//! Defines the interface for the client's persisted state. The layout is a
//! flat namespace of string keys holding serialized JSON payloads, so any
//! backend that can store strings by key qualifies (a directory of files,
//! an in-memory map, a browser-storage bridge).

use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for persisted client state.
///
/// This trait decouples the session and conversation stores from the
/// concrete storage medium, which is what makes the expiry and eviction
/// policies testable without touching a real file system.
///
/// # Implementation Notes
///
/// Implementations should treat `delete` of a missing key as success, and
/// must not interpret the stored values; parsing (and the self-healing of
/// unparseable values) is the caller's concern.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: Key present
    /// - `Ok(None)`: Key absent
    /// - `Err(_)`: Backend failure
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Lists all currently stored keys, in no particular order.
    async fn keys(&self) -> Result<Vec<String>>;
}

/// Well-known storage keys.
///
/// These mirror the layout the rest of the client depends on: `token`,
/// `user` and `last_activity` for the session, `chat_<categoryId>` for
/// per-category transcripts, and `last_chat_category` for reload recovery.
pub mod keys {
    /// Bearer credential for the authenticated user.
    pub const TOKEN: &str = "token";
    /// Serialized identity of the authenticated user.
    pub const USER: &str = "user";
    /// Epoch milliseconds of the most recent observed interaction.
    pub const LAST_ACTIVITY: &str = "last_activity";
    /// Category of the most recently open conversation.
    pub const LAST_CHAT_CATEGORY: &str = "last_chat_category";

    /// Prefix shared by all transcript keys.
    pub const CHAT_PREFIX: &str = "chat_";

    /// Transcript key for a category.
    pub fn chat(category_id: &str) -> String {
        format!("{CHAT_PREFIX}{category_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_key_format() {
        assert_eq!(keys::chat("billing"), "chat_billing");
        assert!(keys::chat("billing").starts_with(keys::CHAT_PREFIX));
    }
}
