//! Unified path management for deskmate files.
//!
//! Configuration and persisted client state live under the platform config
//! directory, so every storage mechanism resolves locations through here.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/deskmate/          # Config directory
//! ├── config.toml              # Client configuration
//! └── state/                   # Persisted key-value state
//!     ├── token.json
//!     ├── user.json
//!     └── chat_<categoryId>.json
//! ```

use deskmate_core::error::{DeskmateError, Result};
use std::path::PathBuf;

/// Unified path management for deskmate.
pub struct DeskmatePaths;

impl DeskmatePaths {
    /// Returns the deskmate configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/deskmate/`)
    /// - `Err(_)`: Could not determine the platform config directory
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("deskmate"))
            .ok_or_else(|| DeskmateError::config("Cannot find config directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory holding persisted key-value state.
    pub fn state_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("state"))
    }
}
