//! Conversation store.
//!
//! Persists one transcript snapshot per help category under
//! `chat_<categoryId>`. Snapshots carry a write timestamp and expire as a
//! whole unit after 24 hours; a transcript is capped at 50 messages with
//! oldest-first eviction. Unreadable storage is never an error here: the
//! store self-heals by deleting the offending key and reporting an empty
//! transcript.

use deskmate_core::clock::Clock;
use deskmate_core::conversation::{ChatMessage, MAX_MESSAGES, TranscriptSnapshot};
use deskmate_core::error::Result;
use deskmate_core::storage::{KeyValueStore, keys};
use std::sync::Arc;

/// Per-category transcript persistence with expiry and eviction.
pub struct ConversationStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl ConversationStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Loads the persisted transcript for a category.
    ///
    /// Returns an empty transcript when the snapshot is absent, expired or
    /// unreadable; the latter two delete the stored key. This operation
    /// never fails: a broken storage backend degrades to an empty
    /// transcript.
    pub async fn load(&self, category_id: &str) -> Vec<ChatMessage> {
        let key = keys::chat(category_id);

        let raw = match self.storage.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Transcript read failed");
                return Vec::new();
            }
        };

        let snapshot: TranscriptSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                let corruption =
                    deskmate_core::DeskmateError::storage_corruption(&key, e.to_string());
                tracing::warn!(error = %corruption, "Corrupt transcript dropped");
                let _ = self.storage.delete(&key).await;
                return Vec::new();
            }
        };

        if snapshot.is_expired(self.clock.now_ms()) {
            let _ = self.storage.delete(&key).await;
            return Vec::new();
        }

        snapshot.messages
    }

    /// Appends a message, evicting oldest entries past the retention cap,
    /// and persists the full snapshot with a fresh timestamp.
    ///
    /// Returns the transcript as persisted.
    pub async fn append(&self, category_id: &str, message: ChatMessage) -> Result<Vec<ChatMessage>> {
        let mut messages = self.load(category_id).await;
        messages.push(message);
        if messages.len() > MAX_MESSAGES {
            let excess = messages.len() - MAX_MESSAGES;
            messages.drain(..excess);
        }
        self.persist(category_id, &messages).await?;
        Ok(messages)
    }

    /// Removes a message by id and re-persists the snapshot.
    ///
    /// Supports rolling back an optimistically appended user message after
    /// a failed analyze call. Removing an id that is not present is a
    /// no-op.
    pub async fn remove(&self, category_id: &str, message_id: &str) -> Result<()> {
        let mut messages = self.load(category_id).await;
        let before = messages.len();
        messages.retain(|m| m.id != message_id);
        if messages.len() != before {
            self.persist(category_id, &messages).await?;
        }
        Ok(())
    }

    /// Rewrites a client-assigned message id with the server-assigned one.
    pub async fn replace_id(
        &self,
        category_id: &str,
        temp_id: &str,
        server_id: &str,
    ) -> Result<()> {
        let mut messages = self.load(category_id).await;
        let mut changed = false;
        for message in &mut messages {
            if message.id == temp_id {
                message.id = server_id.to_string();
                changed = true;
            }
        }
        if changed {
            self.persist(category_id, &messages).await?;
        }
        Ok(())
    }

    /// Removes every persisted transcript whose snapshot has expired or
    /// cannot be read.
    ///
    /// A cleanup pass run once per session start, not on a timer; load-time
    /// expiry is what actually enforces the policy.
    ///
    /// Returns the number of keys removed.
    pub async fn sweep_expired(&self) -> Result<usize> {
        let now = self.clock.now_ms();
        let mut removed = 0;

        for key in self.storage.keys().await? {
            if !key.starts_with(keys::CHAT_PREFIX) {
                continue;
            }
            let Some(raw) = self.storage.get(&key).await? else {
                continue;
            };
            let expired = match serde_json::from_str::<TranscriptSnapshot>(&raw) {
                Ok(snapshot) => snapshot.is_expired(now),
                // Unreadable snapshots are swept with the expired ones.
                Err(_) => true,
            };
            if expired {
                self.storage.delete(&key).await?;
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!(removed, "Swept expired transcripts");
        }
        Ok(removed)
    }

    /// Records the most recently open category for reload recovery.
    pub async fn set_last_category(&self, category_id: &str) -> Result<()> {
        self.storage
            .set(keys::LAST_CHAT_CATEGORY, category_id)
            .await
    }

    /// Returns the most recently open category, if any.
    pub async fn last_category(&self) -> Option<String> {
        self.storage
            .get(keys::LAST_CHAT_CATEGORY)
            .await
            .ok()
            .flatten()
            .filter(|id| !id.is_empty())
    }

    async fn persist(&self, category_id: &str, messages: &[ChatMessage]) -> Result<()> {
        let snapshot = TranscriptSnapshot {
            messages: messages.to_vec(),
            timestamp: self.clock.now_ms(),
        };
        let raw = serde_json::to_string(&snapshot).map_err(|e| {
            deskmate_core::DeskmateError::internal(format!(
                "Failed to serialize transcript: {e}"
            ))
        })?;
        self.storage.set(&keys::chat(category_id), &raw).await
    }
}
