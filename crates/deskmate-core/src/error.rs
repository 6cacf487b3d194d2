//! Error types for the Deskmate client.

use thiserror::Error;

/// A shared error type for the entire Deskmate client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. The variants deliberately
/// separate "the server rejected us" (`Authentication`), "the server sent
/// something we cannot read" (`Validation`), "we never got an answer"
/// (`Network`) and "we stopped waiting" (`Timeout`), because callers react
/// differently to each.
#[derive(Error, Debug, Clone)]
pub enum DeskmateError {
    /// The stored or submitted credentials were rejected. Session state must
    /// be cleared whenever this is returned (fail-closed).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The email/password pair was rejected with a 401. Kept separate from
    /// the generic `Authentication` variant so the sign-in form can show a
    /// precise message.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The server response was missing expected fields or otherwise
    /// malformed. No state is mutated when this is returned.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport-level failure (connection refused, DNS, 5xx).
    #[error("Network error: {0}")]
    Network(String),

    /// A bounded retry loop exhausted its attempts without reaching a
    /// terminal state. Distinct from a server-reported failure.
    #[error("{operation} timed out after {attempts} attempts")]
    Timeout {
        operation: &'static str,
        attempts: u32,
    },

    /// Persisted data under a key could not be parsed. Self-healed by
    /// deleting the key; never surfaced to the user.
    #[error("Corrupt stored data under '{key}': {message}")]
    StorageCorruption { key: String, message: String },

    /// Storage backend error (file system operations).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeskmateError {
    /// Creates an Authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Timeout error
    pub fn timeout(operation: &'static str, attempts: u32) -> Self {
        Self::Timeout {
            operation,
            attempts,
        }
    }

    /// Creates a StorageCorruption error
    pub fn storage_corruption(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StorageCorruption {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error must clear session state (fail-closed).
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_) | Self::InvalidCredentials)
    }

    /// Check if this is a polling timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this is a transport failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is corrupt persisted data
    pub fn is_storage_corruption(&self) -> bool {
        matches!(self, Self::StorageCorruption { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for DeskmateError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// A type alias for `Result<T, DeskmateError>`.
pub type Result<T> = std::result::Result<T, DeskmateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_predicate_covers_both_variants() {
        assert!(DeskmateError::InvalidCredentials.is_authentication());
        assert!(DeskmateError::authentication("token expired").is_authentication());
        assert!(!DeskmateError::network("connection refused").is_authentication());
    }

    #[test]
    fn test_timeout_is_distinct_from_network() {
        let err = DeskmateError::timeout("media analysis poll", 10);
        assert!(err.is_timeout());
        assert!(!err.is_network());
        assert_eq!(
            err.to_string(),
            "media analysis poll timed out after 10 attempts"
        );
    }

    #[test]
    fn test_storage_corruption_names_the_key() {
        let err = DeskmateError::storage_corruption("chat_billing", "expected value at line 1");
        assert!(err.is_storage_corruption());
        assert!(err.to_string().contains("chat_billing"));
    }

    #[test]
    fn test_io_error_converts_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DeskmateError = io.into();
        assert!(matches!(err, DeskmateError::Storage(_)));
    }
}
