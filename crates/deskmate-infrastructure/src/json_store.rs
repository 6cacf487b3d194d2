//! File-backed key-value store.
//!
//! Stores each key as an individual file in a state directory, mirroring
//! the flat key namespace the client persists (`token`, `user`,
//! `chat_<categoryId>`, ...). Values are written verbatim; the callers own
//! the JSON encoding and the handling of unreadable payloads.

use crate::paths::DeskmatePaths;
use async_trait::async_trait;
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::storage::KeyValueStore;
use std::path::{Path, PathBuf};
use tokio::fs;

const VALUE_EXT: &str = "json";

/// A `KeyValueStore` persisting each key to `<state_dir>/<key>.json`.
pub struct JsonFileStore {
    state_dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at the given directory, creating it if
    /// needed.
    pub async fn new(state_dir: impl AsRef<Path>) -> Result<Self> {
        let state_dir = state_dir.as_ref().to_path_buf();
        fs::create_dir_all(&state_dir).await.map_err(|e| {
            DeskmateError::storage(format!(
                "Failed to create state directory {:?}: {}",
                state_dir, e
            ))
        })?;
        Ok(Self { state_dir })
    }

    /// Creates a store at the default location under the platform config
    /// directory.
    pub async fn default_location() -> Result<Self> {
        Self::new(DeskmatePaths::state_dir()?).await
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        // Keys are a flat namespace; path separators would escape the
        // state directory.
        if key.is_empty() || key.contains(['/', '\\']) {
            return Err(DeskmateError::storage(format!(
                "Invalid storage key: '{key}'"
            )));
        }
        Ok(self.state_dir.join(format!("{key}.{VALUE_EXT}")))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DeskmateError::storage(format!(
                "Failed to read {:?}: {}",
                path, e
            ))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        fs::write(&path, value)
            .await
            .map_err(|e| DeskmateError::storage(format!("Failed to write {:?}: {}", path, e)))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DeskmateError::storage(format!(
                "Failed to delete {:?}: {}",
                path, e
            ))),
        }
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut entries = fs::read_dir(&self.state_dir).await.map_err(|e| {
            DeskmateError::storage(format!(
                "Failed to read state directory {:?}: {}",
                self.state_dir, e
            ))
        })?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DeskmateError::storage(format!("Failed to read directory entry: {e}")))?
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some(VALUE_EXT) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path()).await.unwrap();

        store.set("token", "abc123").await.unwrap();
        assert_eq!(
            store.get("token").await.unwrap(),
            Some("abc123".to_string())
        );

        store.delete("token").await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_keys_strip_extension() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path()).await.unwrap();

        store.set("chat_billing", "{}").await.unwrap();
        store.set("last_chat_category", "billing").await.unwrap();

        let mut keys = store.keys().await.unwrap();
        keys.sort();
        assert_eq!(
            keys,
            vec!["chat_billing".to_string(), "last_chat_category".to_string()]
        );
    }

    #[tokio::test]
    async fn test_path_separator_keys_rejected() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path()).await.unwrap();
        assert!(store.set("../escape", "x").await.is_err());
        assert!(store.get("").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path()).await.unwrap();
        store.delete("never_set").await.unwrap();
    }
}
