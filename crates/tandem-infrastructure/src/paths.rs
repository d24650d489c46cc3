//! Path management for Tandem configuration and state files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/tandem/            # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/tandem/       # Data directory (only used when storage is enabled)
//! ├── sessions.toml            # Session store snapshot
//! └── conversations.toml       # Conversation store snapshot
//! ```

use std::path::{Path, PathBuf};
use tandem_core::TandemError;
use tandem_core::config::AppConfig;

const APP_DIR: &str = "tandem";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// No platform config directory could be determined.
    ConfigDirNotFound,
    /// No platform data directory could be determined.
    DataDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot determine config directory"),
            PathError::DataDirNotFound => write!(f, "Cannot determine data directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for TandemError {
    fn from(err: PathError) -> Self {
        TandemError::config(err.to_string())
    }
}

/// Resolves where Tandem reads configuration and keeps state.
pub struct TandemPaths;

impl TandemPaths {
    /// Platform config directory, e.g. `~/.config/tandem/`.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Platform data directory, e.g. `~/.local/share/tandem/`.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DataDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// The configured data directory, falling back to the platform default.
    pub fn resolve_data_dir(config: &AppConfig) -> Result<PathBuf, PathError> {
        match &config.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::data_dir(),
        }
    }

    pub fn sessions_file(data_dir: &Path) -> PathBuf {
        data_dir.join("sessions.toml")
    }

    pub fn conversations_file(data_dir: &Path) -> PathBuf {
        data_dir.join("conversations.toml")
    }
}
