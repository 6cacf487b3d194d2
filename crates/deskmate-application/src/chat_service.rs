//! Chat use case.
//!
//! Coordinates the conversation store, the session store and the analyze
//! endpoint for the send/receive flow. Ordering contract: the user's
//! message is appended optimistically before the network call resolves,
//! and the assistant's reply is appended only after a successful response.
//! On failure the optimistic message is removed rather than left dangling.

use crate::conversation_store::ConversationStore;
use crate::session_store::SessionStore;
use deskmate_core::category::Category;
use deskmate_core::clock::Clock;
use deskmate_core::conversation::{ChatMessage, sanitize_content};
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::gateway::{AnalyzeRequest, CategoryGateway, ChatGateway};
use std::sync::Arc;

/// Outcome of a successful send: the transcript plus the assistant reply's
/// confidence.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    /// Transcript as persisted, ending with the assistant reply.
    pub messages: Vec<ChatMessage>,
    /// Server confidence in the answer, 0.0..=1.0.
    pub confidence: f32,
}

/// Use case for one category's conversation.
pub struct ChatService {
    chat: Arc<dyn ChatGateway>,
    categories: Arc<dyn CategoryGateway>,
    conversations: Arc<ConversationStore>,
    session: Arc<SessionStore>,
    clock: Arc<dyn Clock>,
}

impl ChatService {
    pub fn new(
        chat: Arc<dyn ChatGateway>,
        categories: Arc<dyn CategoryGateway>,
        conversations: Arc<ConversationStore>,
        session: Arc<SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            chat,
            categories,
            conversations,
            session,
            clock,
        }
    }

    /// Lists the categories available on the picker.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.categories.list().await
    }

    /// Opens a conversation: validates the category, restores its
    /// transcript, records it for reload recovery and counts as user
    /// activity.
    pub async fn open_conversation(
        &self,
        category_id: &str,
    ) -> Result<(Category, Vec<ChatMessage>)> {
        let category = self.categories.get(category_id).await?;
        let messages = self.conversations.load(category_id).await;
        self.conversations.set_last_category(category_id).await?;
        self.session.touch_activity().await?;
        Ok((category, messages))
    }

    /// Returns the category a reloaded client should reopen, if any.
    pub async fn resume_category(&self) -> Option<String> {
        self.conversations.last_category().await
    }

    /// Sends a user message and appends the assistant's answer.
    ///
    /// The sanitized user message is appended optimistically with a
    /// client-assigned id; on success the id is reconciled with the
    /// server-assigned one and the reply is appended; on failure the
    /// optimistic message is rolled back and the error is surfaced with
    /// its original kind.
    pub async fn send_message(&self, category: &Category, content: &str) -> Result<SendOutcome> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DeskmateError::validation("Message is empty"));
        }

        self.session.touch_activity().await?;

        let now = self.clock.now();
        let user_message = ChatMessage::user(trimmed, &category.name, now.to_rfc3339());
        let temp_id = user_message.id.clone();

        self.conversations
            .append(&category.id, user_message)
            .await?;

        let request = AnalyzeRequest {
            content: sanitize_content(trimmed),
            category: category.name.clone(),
            user_id: self.session.current().await.user.map(|u| u.id),
            timestamp: now.to_rfc3339(),
            kind: "text".to_string(),
        };

        let response = match self.chat.analyze(&request).await {
            Ok(response) => response,
            Err(e) => {
                // Roll back the optimistic append; the rollback failing
                // must not mask the original error.
                if let Err(rollback) = self.conversations.remove(&category.id, &temp_id).await {
                    tracing::warn!(error = %rollback, "Rollback of optimistic message failed");
                }
                tracing::warn!(category = %category.id, error = %e, "Analyze call failed");
                return Err(e);
            }
        };

        if let Some(server_id) = response.user_message_id.as_deref() {
            self.conversations
                .replace_id(&category.id, &temp_id, server_id)
                .await?;
        }

        let reply = ChatMessage::assistant(
            response.id,
            &response.content,
            &category.name,
            response.created_at,
        );
        let messages = self.conversations.append(&category.id, reply).await?;

        Ok(SendOutcome {
            messages,
            confidence: response.confidence,
        })
    }

    /// Fetches the server-side message history for the signed-in user.
    pub async fn server_history(&self) -> Result<Vec<ChatMessage>> {
        let session = self.session.current().await;
        let user = session
            .user
            .ok_or_else(|| DeskmateError::authentication("Not signed in"))?;
        self.chat.history(&user.id).await
    }
}
