//! Conversation repository trait.

use super::model::ConversationSnapshot;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for persisting the conversation store.
///
/// Same contract as [`crate::session::SessionRepository`]: called only at the
/// load/save boundary, never from inside a store mutation.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Loads the last saved snapshot, or `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<ConversationSnapshot>>;

    /// Replaces the stored snapshot.
    async fn save(&self, snapshot: &ConversationSnapshot) -> Result<()>;
}
