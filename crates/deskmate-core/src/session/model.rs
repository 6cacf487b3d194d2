//! Session domain model.
//!
//! The session is the authenticated identity plus its idle-timeout state.
//! It is a plain value; all mutation goes through the application-level
//! session store, which keeps it consistent with persisted storage.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Idle duration after which a session is forcibly signed out.
pub const IDLE_TIMEOUT_MS: i64 = 30 * 60 * 1000;

/// Role attached to a user identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    /// Regular support-seeking user.
    User,
    /// Administrator with access to the admin surface.
    Admin,
}

/// Identity record returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Sign-in email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Role granted by the backend
    pub role: UserRole,
    /// Whether the account is enabled (admin listings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Account creation timestamp (admin listings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Most recent login timestamp (admin listings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

/// The authenticated identity and its idle-timeout state.
///
/// Invariant: `user` and `token` are either both present (a verification
/// call accepted the token) or both absent. The session store upholds this
/// by always setting and clearing them together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Identity accepted by the last verification call, if any.
    pub user: Option<User>,
    /// Opaque bearer credential. Never inspected client-side.
    pub token: Option<String>,
    /// Epoch milliseconds of the most recent observed user interaction.
    pub last_activity: i64,
}

impl Session {
    /// Creates an unauthenticated session stamped with the current time.
    pub fn unauthenticated(now_ms: i64) -> Self {
        Self {
            user: None,
            token: None,
            last_activity: now_ms,
        }
    }

    /// Creates an authenticated session stamped with the current time.
    pub fn authenticated(user: User, token: String, now_ms: i64) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            last_activity: now_ms,
        }
    }

    /// True when both identity and token are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// True when the authenticated user carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.role == UserRole::Admin)
    }

    /// True when the idle duration strictly exceeds [`IDLE_TIMEOUT_MS`].
    ///
    /// The boundary is strict: a session idle for exactly 30 minutes is
    /// still live.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms - self.last_activity > IDLE_TIMEOUT_MS
    }
}
