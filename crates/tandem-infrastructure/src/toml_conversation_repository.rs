//! TOML-based ConversationRepository implementation

use crate::paths::TandemPaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tandem_core::conversation::{ConversationRepository, ConversationSnapshot};
use tandem_core::error::Result;

/// Stores threads, summaries and the active pointer as `conversations.toml`.
pub struct TomlConversationRepository {
    file: AtomicTomlFile<ConversationSnapshot>,
}

impl TomlConversationRepository {
    /// Creates a repository writing to `<data_dir>/conversations.toml`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            file: AtomicTomlFile::new(TandemPaths::conversations_file(data_dir.as_ref())),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }
}

#[async_trait]
impl ConversationRepository for TomlConversationRepository {
    async fn load(&self) -> Result<Option<ConversationSnapshot>> {
        let Some(snapshot) = self.file.load()? else {
            return Ok(None);
        };

        snapshot.validate()?;
        tracing::debug!(
            "[TomlConversationRepository] Loaded {} threads from {}",
            snapshot.threads.len(),
            self.file.path().display()
        );
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &ConversationSnapshot) -> Result<()> {
        self.file.save(snapshot)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tandem_core::seed::SeedData;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_then_load_keeps_unicode_and_order() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlConversationRepository::new(temp_dir.path());
        let mut snapshot = SeedData::demo().unwrap().conversation_snapshot();
        snapshot.active_conversation_id = Some("4".to_string());

        repository.save(&snapshot).await.unwrap();
        let loaded = repository.load().await.unwrap().unwrap();

        assert_eq!(loaded, snapshot);
        assert!(loaded.threads[1].messages[0].text.starts_with("こんにちは"));
    }

    #[tokio::test]
    async fn test_dangling_active_id_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlConversationRepository::new(temp_dir.path());
        fs::write(repository.path(), "active_conversation_id = \"999\"\n").unwrap();

        let err = repository.load().await.unwrap_err();

        assert!(err.is_not_found());
    }
}
