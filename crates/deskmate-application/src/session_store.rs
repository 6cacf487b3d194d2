//! Session store.
//!
//! Owns the authenticated user, the bearer-token lifecycle and the
//! last-activity timestamp. Every state-changing operation leaves
//! persisted storage consistent with the in-memory session before it
//! returns; no operation updates one without the other.

use deskmate_core::clock::Clock;
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::gateway::{AuthGateway, Registration};
use deskmate_core::session::{BearerToken, Session, User};
use deskmate_core::storage::{KeyValueStore, keys};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The client-side session lifecycle: sign-in, verification, sign-out and
/// idle-timeout bookkeeping.
pub struct SessionStore {
    session: RwLock<Session>,
    storage: Arc<dyn KeyValueStore>,
    auth: Arc<dyn AuthGateway>,
    token: BearerToken,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Creates a store with no authenticated session.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        auth: Arc<dyn AuthGateway>,
        token: BearerToken,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let now = clock.now_ms();
        Self {
            session: RwLock::new(Session::unauthenticated(now)),
            storage,
            auth,
            token,
            clock,
        }
    }

    /// Returns a snapshot of the current session.
    pub async fn current(&self) -> Session {
        self.session.read().await.clone()
    }

    /// True when both identity and token are present.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// Exchanges credentials for a token and identity.
    ///
    /// Any previously persisted credentials are cleared before the attempt,
    /// so a failed sign-in can never leave a stale session behind. A 401
    /// surfaces as [`DeskmateError::InvalidCredentials`]; other failures
    /// keep their own kind.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        // Drop any previous credentials everywhere before the attempt, so
        // memory and storage agree whether the exchange succeeds or not.
        self.token.clear();
        *self.session.write().await = Session::unauthenticated(self.clock.now_ms());
        self.clear_session().await?;

        let response = match self.auth.sign_in(email, password).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Sign-in failed");
                return Err(e);
            }
        };

        let now = self.clock.now_ms();
        let session = Session::authenticated(response.user, response.access_token, now);
        self.persist_session(&session).await?;

        self.token
            .set(session.token.clone().unwrap_or_default());
        *self.session.write().await = session.clone();

        Ok(session)
    }

    /// Re-validates a previously stored token against the backend.
    ///
    /// Used on application start. Fail-closed: any failure (no stored
    /// token, transport error, rejection) clears all session state before
    /// the error is returned.
    pub async fn verify(&self) -> Result<Session> {
        if !self.token.is_present() {
            self.sign_out().await?;
            return Err(DeskmateError::authentication("No stored token"));
        }

        match self.auth.verify().await {
            Ok(user) => {
                let now = self.clock.now_ms();
                let token = self.token.get().unwrap_or_default();
                let session = Session::authenticated(user, token, now);
                self.persist_session(&session).await?;
                *self.session.write().await = session.clone();
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token verification failed; signing out");
                self.sign_out().await?;
                Err(e)
            }
        }
    }

    /// Restores persisted credentials into memory, then re-validates them.
    ///
    /// The restore itself does not trust the stored identity; `verify`
    /// decides whether the session survives. Unreadable stored identity is
    /// treated like an absent one.
    pub async fn restore(&self) -> Result<Session> {
        let stored_token = self.storage.get(keys::TOKEN).await?;
        match stored_token {
            Some(token) if !token.is_empty() => self.token.set(token),
            _ => self.token.clear(),
        }
        self.verify().await
    }

    /// Creates a new account. Does not sign the new user in.
    pub async fn register(&self, registration: &Registration) -> Result<User> {
        self.auth.register(registration).await
    }

    /// Unconditionally clears token, user and all derived persisted keys.
    ///
    /// Idempotent. The in-memory session and the shared token handle are
    /// cleared before storage is touched, so even a storage failure cannot
    /// leave the client acting authenticated.
    pub async fn sign_out(&self) -> Result<()> {
        self.token.clear();
        let now = self.clock.now_ms();
        *self.session.write().await = Session::unauthenticated(now);
        self.clear_session().await?;

        // Transcripts are derived from the signed-in session; drop them too.
        for key in self.storage.keys().await? {
            if key.starts_with(keys::CHAT_PREFIX) {
                self.storage.delete(&key).await?;
            }
        }
        self.storage.delete(keys::LAST_CHAT_CATEGORY).await?;

        Ok(())
    }

    /// Updates the last-activity timestamp in memory and storage.
    ///
    /// Called by the embedding UI's interaction listeners (pointer, key,
    /// scroll, touch) and on entry into a protected route.
    pub async fn touch_activity(&self) -> Result<()> {
        let now = self.clock.now_ms();
        self.storage
            .set(keys::LAST_ACTIVITY, &now.to_string())
            .await?;
        self.session.write().await.last_activity = now;
        Ok(())
    }

    /// True when the idle duration strictly exceeds the 30-minute timeout.
    pub async fn is_expired(&self) -> bool {
        let now = self.clock.now_ms();
        self.session.read().await.is_expired(now)
    }

    async fn persist_session(&self, session: &Session) -> Result<()> {
        let token = session.token.clone().unwrap_or_default();
        let user = session
            .user
            .as_ref()
            .ok_or_else(|| DeskmateError::internal("Persisting a session without a user"))?;
        let user_json = serde_json::to_string(user)
            .map_err(|e| DeskmateError::internal(format!("Failed to serialize user: {e}")))?;

        self.storage.set(keys::TOKEN, &token).await?;
        self.storage.set(keys::USER, &user_json).await?;
        self.storage
            .set(keys::LAST_ACTIVITY, &session.last_activity.to_string())
            .await?;
        Ok(())
    }

    async fn clear_session(&self) -> Result<()> {
        self.storage.delete(keys::TOKEN).await?;
        self.storage.delete(keys::USER).await?;
        self.storage.delete(keys::LAST_ACTIVITY).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ManualClock;
    use deskmate_core::gateway::SignInResponse;
    use deskmate_core::session::UserRole;
    use deskmate_infrastructure::MemoryStore;

    struct MockAuthGateway {
        fail_sign_in: bool,
        fail_verify: bool,
    }

    impl MockAuthGateway {
        fn accepting() -> Self {
            Self {
                fail_sign_in: false,
                fail_verify: false,
            }
        }

        fn rejecting() -> Self {
            Self {
                fail_sign_in: true,
                fail_verify: true,
            }
        }
    }

    fn test_user() -> User {
        User {
            id: "u-1".to_string(),
            email: "sam@example.com".to_string(),
            name: "Sam".to_string(),
            role: UserRole::User,
            is_active: None,
            created_at: None,
            last_login: None,
        }
    }

    #[async_trait::async_trait]
    impl AuthGateway for MockAuthGateway {
        async fn sign_in(&self, _email: &str, _password: &str) -> Result<SignInResponse> {
            if self.fail_sign_in {
                return Err(DeskmateError::InvalidCredentials);
            }
            Ok(SignInResponse {
                access_token: "tok-1".to_string(),
                user: test_user(),
            })
        }

        async fn verify(&self) -> Result<User> {
            if self.fail_verify {
                return Err(DeskmateError::authentication("token rejected"));
            }
            Ok(test_user())
        }

        async fn register(&self, registration: &Registration) -> Result<User> {
            let mut user = test_user();
            user.email = registration.email.clone();
            Ok(user)
        }
    }

    fn store_with(auth: MockAuthGateway, clock: Arc<ManualClock>) -> (SessionStore, MemoryStore) {
        let storage = MemoryStore::new();
        let store = SessionStore::new(
            Arc::new(storage.clone()),
            Arc::new(auth),
            BearerToken::new(),
            clock,
        );
        (store, storage)
    }

    #[tokio::test]
    async fn test_sign_in_persists_and_sets_memory() {
        let clock = Arc::new(ManualClock::new(1_000));
        let (store, storage) = store_with(MockAuthGateway::accepting(), clock);

        let session = store.sign_in("sam@example.com", "pw").await.unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.last_activity, 1_000);

        // Storage mirrors memory in the same call.
        assert_eq!(
            storage.get(keys::TOKEN).await.unwrap(),
            Some("tok-1".to_string())
        );
        assert!(storage.get(keys::USER).await.unwrap().is_some());
        assert_eq!(
            storage.get(keys::LAST_ACTIVITY).await.unwrap(),
            Some("1000".to_string())
        );
    }

    #[tokio::test]
    async fn test_failed_sign_in_leaves_unauthenticated() {
        let clock = Arc::new(ManualClock::new(0));
        let (store, storage) = store_with(MockAuthGateway::rejecting(), clock);

        let err = store.sign_in("sam@example.com", "bad").await.unwrap_err();
        assert!(matches!(err, DeskmateError::InvalidCredentials));
        assert!(!store.is_authenticated().await);
        assert_eq!(storage.get(keys::TOKEN).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sign_out_then_verify_is_unauthenticated() {
        let clock = Arc::new(ManualClock::new(0));
        let (store, storage) = store_with(MockAuthGateway::accepting(), clock);

        store.sign_in("sam@example.com", "pw").await.unwrap();
        store.sign_out().await.unwrap();

        // No token remains, so verification fails closed.
        let err = store.verify().await.unwrap_err();
        assert!(err.is_authentication());
        assert!(!store.is_authenticated().await);
        assert_eq!(storage.get(keys::TOKEN).await.unwrap(), None);

        // Idempotent.
        store.sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn test_sign_out_drops_transcripts() {
        let clock = Arc::new(ManualClock::new(0));
        let (store, storage) = store_with(MockAuthGateway::accepting(), clock);

        store.sign_in("sam@example.com", "pw").await.unwrap();
        storage.set("chat_billing", "{}").await.unwrap();
        storage.set(keys::LAST_CHAT_CATEGORY, "billing").await.unwrap();

        store.sign_out().await.unwrap();
        assert_eq!(storage.get("chat_billing").await.unwrap(), None);
        assert_eq!(storage.get(keys::LAST_CHAT_CATEGORY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_verify_clears_everything() {
        let clock = Arc::new(ManualClock::new(0));
        let storage = MemoryStore::new();
        storage.set(keys::TOKEN, "stale-token").await.unwrap();
        let store = SessionStore::new(
            Arc::new(storage.clone()),
            Arc::new(MockAuthGateway::rejecting()),
            BearerToken::new(),
            clock,
        );

        let err = store.restore().await.unwrap_err();
        assert!(err.is_authentication());
        assert_eq!(storage.get(keys::TOKEN).await.unwrap(), None);
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_idle_expiry_boundary() {
        let clock = Arc::new(ManualClock::new(0));
        let (store, _storage) = store_with(MockAuthGateway::accepting(), clock.clone());
        store.sign_in("sam@example.com", "pw").await.unwrap();

        clock.advance(29 * 60 * 1000);
        assert!(!store.is_expired().await);

        clock.advance(2 * 60 * 1000); // 31 minutes total
        assert!(store.is_expired().await);

        // Activity resets the timer.
        store.touch_activity().await.unwrap();
        assert!(!store.is_expired().await);
    }

    #[tokio::test]
    async fn test_touch_activity_updates_storage() {
        let clock = Arc::new(ManualClock::new(5_000));
        let (store, storage) = store_with(MockAuthGateway::accepting(), clock.clone());

        clock.advance(1_000);
        store.touch_activity().await.unwrap();
        assert_eq!(
            storage.get(keys::LAST_ACTIVITY).await.unwrap(),
            Some("6000".to_string())
        );
    }
}
