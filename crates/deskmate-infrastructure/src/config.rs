//! Client configuration loading.
//!
//! Configuration priority: ~/.config/deskmate/config.toml > environment
//! variables > built-in defaults. A missing file is not an error; a file
//! that exists but cannot be parsed is.

use crate::paths::DeskmatePaths;
use deskmate_core::error::{DeskmateError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL all endpoint paths are joined to.
    pub base_url: String,
    /// Per-request transport timeout in seconds.
    pub request_timeout_secs: u64,
    /// Override for the persisted-state directory. When unset, state lives
    /// under the platform config dir.
    pub state_dir: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            state_dir: None,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default config file path, falling back
    /// to environment variables and defaults.
    ///
    /// The `DESKMATE_API_URL` environment variable overrides the base URL
    /// whether or not a config file exists, mirroring how deployments point
    /// the client at a staging backend without editing files.
    pub fn load() -> Result<Self> {
        let mut config = match DeskmatePaths::config_file() {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(url) = env::var("DESKMATE_API_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        Ok(config)
    }

    /// Loads configuration from a specific TOML file.
    ///
    /// # Returns
    ///
    /// - `Ok(ClientConfig)`: Parsed file, or defaults if the file is absent
    ///   or empty
    /// - `Err(_)`: The file exists but cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DeskmateError::config(format!("Failed to read config file at {:?}: {}", path, e))
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&content).map_err(|e| {
            DeskmateError::config(format!("Failed to parse TOML from {:?}: {}", path, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ClientConfig::from_file(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"base_url = \"https://support.example.com/api/v1\"\n")
            .unwrap();
        file.flush().unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://support.example.com/api/v1");
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"base_url = [not toml").unwrap();
        file.flush().unwrap();

        let err = ClientConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, DeskmateError::Config(_)));
    }
}
