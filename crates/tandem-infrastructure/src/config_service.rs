//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `~/.config/tandem/config.toml` or an explicit
//! path. A missing default file means "use defaults"; a missing explicit file
//! is an error.

use crate::paths::TandemPaths;
use crate::storage::AtomicTomlFile;
use std::path::{Path, PathBuf};
use tandem_core::TandemError;
use tandem_core::config::AppConfig;
use tandem_core::error::Result;

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    explicit: bool,
}

impl ConfigService {
    /// Uses the platform config file.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: TandemPaths::config_file()?,
            explicit: false,
        })
    }

    /// Uses a caller-supplied config file, which must exist.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            explicit: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AppConfig> {
        if self.explicit && !self.path.exists() {
            return Err(TandemError::config(format!(
                "config file not found: {}",
                self.path.display()
            )));
        }

        let file = AtomicTomlFile::<AppConfig>::new(self.path.clone());
        match file.load()? {
            Some(config) => {
                tracing::debug!("[ConfigService] Loaded {}", self.path.display());
                Ok(config)
            }
            None => {
                tracing::debug!(
                    "[ConfigService] No config at {}, using defaults",
                    self.path.display()
                );
                Ok(AppConfig::default())
            }
        }
    }

    /// Writes `config` to the config path, creating parent directories.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        AtomicTomlFile::new(self.path.clone()).save(config)?;
        Ok(())
    }
}
