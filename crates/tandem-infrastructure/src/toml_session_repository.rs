//! TOML-based SessionRepository implementation

use crate::paths::TandemPaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tandem_core::error::Result;
use tandem_core::session::{SessionRepository, SessionSnapshot};

/// Stores the whole session store as one `sessions.toml` snapshot.
pub struct TomlSessionRepository {
    file: AtomicTomlFile<SessionSnapshot>,
}

impl TomlSessionRepository {
    /// Creates a repository writing to `<data_dir>/sessions.toml`.
    ///
    /// Nothing is created on disk until the first save.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            file: AtomicTomlFile::new(TandemPaths::sessions_file(data_dir.as_ref())),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

#[async_trait]
impl SessionRepository for TomlSessionRepository {
    async fn load(&self) -> Result<Option<SessionSnapshot>> {
        let Some(snapshot) = self.file.load()? else {
            tracing::debug!(
                "[TomlSessionRepository] No snapshot at {}",
                self.file.path().display()
            );
            return Ok(None);
        };

        snapshot.validate()?;
        tracing::debug!(
            "[TomlSessionRepository] Loaded {} sessions from {}",
            snapshot.upcoming.len() + snapshot.past.len(),
            self.file.path().display()
        );
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        self.file.save(snapshot)?;
        Ok(())
    }
}
