//! Application container.
//!
//! All shared state lives here and is passed into views explicitly; there
//! are no ambient globals. `bootstrap` builds the production wiring
//! (config file, file-backed storage, HTTP gateways); `with_collaborators`
//! accepts arbitrary implementations so tests can assemble the same object
//! graph around mocks.

use crate::admin_service::AdminService;
use crate::chat_service::ChatService;
use crate::conversation_store::ConversationStore;
use crate::media_service::{Delay, MediaAnalysisService, TokioDelay};
use crate::session_store::SessionStore;
use crate::watchdog::{GuardEvent, TimerHandle, spawn_idle_watchdog};
use deskmate_api::{
    ApiClient, HttpAdminGateway, HttpAuthGateway, HttpCategoryGateway, HttpChatGateway,
    HttpFeedbackGateway, HttpMediaGateway,
};
use deskmate_core::clock::{Clock, SystemClock};
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::gateway::{
    AdminGateway, AuthGateway, CategoryGateway, ChatGateway, FeedbackGateway, MediaGateway,
};
use deskmate_core::route::{GuardDecision, LOGIN_ROUTE, RouteAccess, classify, evaluate};
use deskmate_core::session::BearerToken;
use deskmate_core::storage::KeyValueStore;
use deskmate_infrastructure::{ClientConfig, JsonFileStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Everything a view needs, wired once at startup.
pub struct AppContainer {
    pub config: ClientConfig,
    pub session: Arc<SessionStore>,
    pub conversations: Arc<ConversationStore>,
    pub chat: Arc<ChatService>,
    pub media: Arc<MediaAnalysisService>,
    pub admin: Arc<AdminService>,
    pub feedback: Arc<dyn FeedbackGateway>,
}

/// External collaborators injected into the container.
///
/// Production wiring fills this from the HTTP gateways; tests fill it with
/// mocks.
pub struct Collaborators {
    pub auth: Arc<dyn AuthGateway>,
    pub categories: Arc<dyn CategoryGateway>,
    pub chat: Arc<dyn ChatGateway>,
    pub media: Arc<dyn MediaGateway>,
    pub feedback: Arc<dyn FeedbackGateway>,
    pub admin: Arc<dyn AdminGateway>,
}

impl AppContainer {
    /// Builds the production container and restores persisted state.
    ///
    /// Startup order: load config, open storage, sweep expired
    /// transcripts, then try to restore and verify a persisted session.
    /// Restore failure is the normal signed-out start, not an error.
    pub async fn bootstrap() -> Result<Self> {
        let config = ClientConfig::load()?;

        let storage: Arc<dyn KeyValueStore> = match &config.state_dir {
            Some(dir) => Arc::new(JsonFileStore::new(dir).await?),
            None => Arc::new(JsonFileStore::default_location().await?),
        };

        let token = BearerToken::new();
        let api = ApiClient::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
            token.clone(),
        )?;

        let collaborators = Collaborators {
            auth: Arc::new(HttpAuthGateway::new(api.clone())),
            categories: Arc::new(HttpCategoryGateway::new(api.clone())),
            chat: Arc::new(HttpChatGateway::new(api.clone())),
            media: Arc::new(HttpMediaGateway::new(api.clone())),
            feedback: Arc::new(HttpFeedbackGateway::new(api.clone())),
            admin: Arc::new(HttpAdminGateway::new(api)),
        };

        let container = Self::with_collaborators(
            config,
            storage,
            token,
            Arc::new(SystemClock),
            Arc::new(TokioDelay),
            collaborators,
        );

        container.conversations.sweep_expired().await?;

        if let Err(e) = container.session.restore().await {
            tracing::info!(reason = %e, "Starting unauthenticated");
        }

        Ok(container)
    }

    /// Assembles the container from explicit parts.
    pub fn with_collaborators(
        config: ClientConfig,
        storage: Arc<dyn KeyValueStore>,
        token: BearerToken,
        clock: Arc<dyn Clock>,
        delay: Arc<dyn Delay>,
        collaborators: Collaborators,
    ) -> Self {
        let session = Arc::new(SessionStore::new(
            storage.clone(),
            collaborators.auth,
            token,
            clock.clone(),
        ));
        let conversations = Arc::new(ConversationStore::new(storage, clock.clone()));
        let chat = Arc::new(ChatService::new(
            collaborators.chat,
            collaborators.categories,
            conversations.clone(),
            session.clone(),
            clock,
        ));
        let media = Arc::new(MediaAnalysisService::new(collaborators.media, delay));
        let admin = Arc::new(AdminService::new(collaborators.admin, session.clone()));

        Self {
            config,
            session,
            conversations,
            chat,
            media,
            admin,
            feedback: collaborators.feedback,
        }
    }

    /// Evaluates the route guard for a navigation.
    ///
    /// Pure guard logic plus the one contractual side effect: entering a
    /// protected view counts as user activity.
    pub async fn authorize_navigation(&self, path: &str) -> Result<GuardDecision> {
        let session = self.session.current().await;
        let decision = evaluate(path, &session);

        if decision.is_allowed() && classify(path) != RouteAccess::Public {
            self.session.touch_activity().await?;
        }
        Ok(decision)
    }

    /// Starts the idle watchdog; expiry notifications arrive on `events`.
    pub fn start_idle_watchdog(&self, events: mpsc::UnboundedSender<GuardEvent>) -> TimerHandle {
        spawn_idle_watchdog(self.session.clone(), events)
    }

    /// Applies the global 401/403 rule to a failed API call.
    ///
    /// A backend rejection of the current token fails the session closed
    /// and tells the caller to redirect to the login route. Rejected
    /// sign-in credentials are not a session rejection and pass through.
    pub async fn handle_api_error(&self, error: &DeskmateError) -> Option<GuardDecision> {
        if !matches!(error, DeskmateError::Authentication(_)) {
            return None;
        }

        tracing::warn!(error = %error, "Backend rejected the session; signing out");
        if let Err(e) = self.session.sign_out().await {
            tracing::error!(error = %e, "Forced sign-out failed to clear storage");
        }
        Some(GuardDecision::Redirect(LOGIN_ROUTE))
    }
}
