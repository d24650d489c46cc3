//! Session repository trait.
//!
//! Defines the load/save boundary around the in-memory session store.

use super::model::SessionSnapshot;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for persisting the session store.
///
/// The store itself never calls a repository. The application loads a
/// snapshot once at startup and saves one after mutations succeed, so the
/// in-memory store stays the source of truth for the running process.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the last saved snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(snapshot))`: A snapshot was stored
    /// - `Ok(None)`: Nothing has been saved yet
    /// - `Err(_)`: Storage could not be read or parsed
    async fn load(&self) -> Result<Option<SessionSnapshot>>;

    /// Replaces the stored snapshot.
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;
}
