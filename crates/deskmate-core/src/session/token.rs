//! Shared bearer-token handle.

use std::sync::{Arc, RwLock};

/// A cloneable handle to the current bearer credential.
///
/// The session store owns the token lifecycle (set on sign-in, cleared on
/// sign-out or failed verification); the API client reads it to attach the
/// `Authorization` header to every outbound request. Both sides hold clones
/// of the same handle, so a sign-out is visible to in-flight request
/// builders immediately.
#[derive(Debug, Clone, Default)]
pub struct BearerToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl BearerToken {
    /// Creates an empty handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current token, if any.
    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the current token.
    pub fn set(&self, token: impl Into<String>) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.into());
    }

    /// Clears the current token.
    pub fn clear(&self) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    /// True when a token is currently held.
    pub fn is_present(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = BearerToken::new();
        let observer = token.clone();

        assert!(!observer.is_present());

        token.set("abc123");
        assert_eq!(observer.get(), Some("abc123".to_string()));

        token.clear();
        assert!(observer.get().is_none());
    }
}
