//! Application wiring.
//!
//! `TandemApp` is constructed once at startup and passed by reference to
//! whatever layer needs the stores. It is also the only place that talks to
//! repositories: snapshots are loaded before the stores exist and saved after
//! mutations have succeeded.

use crate::conversation::ConversationStore;
use crate::partner_directory::PartnerDirectory;
use crate::session::{ScheduleOutcome, ScheduleRequest, SessionScheduler, SessionStore};
use std::sync::Arc;
use tandem_core::config::AppConfig;
use tandem_core::conversation::ConversationRepository;
use tandem_core::error::Result;
use tandem_core::seed::SeedData;
use tandem_core::session::SessionRepository;

struct Persistence {
    session_repository: Arc<dyn SessionRepository>,
    conversation_repository: Arc<dyn ConversationRepository>,
}

/// Owns both stores plus the partner directory and scheduler.
pub struct TandemApp {
    sessions: SessionStore,
    conversations: ConversationStore,
    partners: PartnerDirectory,
    scheduler: SessionScheduler,
    persistence: Option<Persistence>,
}

impl TandemApp {
    /// Builds a purely in-memory application from seed data.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed violates a store invariant.
    pub fn from_seed(seed: SeedData, config: &AppConfig) -> Result<Self> {
        let sessions = SessionStore::from_snapshot(seed.session_snapshot())?;
        let conversations = ConversationStore::from_snapshot(seed.conversation_snapshot())?;

        Ok(Self {
            sessions,
            conversations,
            partners: PartnerDirectory::new(seed.partners),
            scheduler: SessionScheduler::new(config.scheduling.clone()),
            persistence: None,
        })
    }

    /// Builds an application backed by repositories.
    ///
    /// Each store starts from its saved snapshot when one exists, otherwise
    /// from the seed. Partners always come from the seed.
    ///
    /// # Errors
    ///
    /// Returns an error if a repository fails to load or a snapshot is invalid.
    pub async fn load(
        seed: SeedData,
        config: &AppConfig,
        session_repository: Arc<dyn SessionRepository>,
        conversation_repository: Arc<dyn ConversationRepository>,
    ) -> Result<Self> {
        let session_snapshot = match session_repository.load().await? {
            Some(snapshot) => {
                tracing::info!(
                    "[TandemApp] Restored {} upcoming / {} past sessions",
                    snapshot.upcoming.len(),
                    snapshot.past.len()
                );
                snapshot
            }
            None => {
                tracing::info!("[TandemApp] No saved sessions, starting from seed");
                seed.session_snapshot()
            }
        };

        let conversation_snapshot = match conversation_repository.load().await? {
            Some(snapshot) => {
                tracing::info!(
                    "[TandemApp] Restored {} conversations",
                    snapshot.threads.len()
                );
                snapshot
            }
            None => {
                tracing::info!("[TandemApp] No saved conversations, starting from seed");
                seed.conversation_snapshot()
            }
        };

        Ok(Self {
            sessions: SessionStore::from_snapshot(session_snapshot)?,
            conversations: ConversationStore::from_snapshot(conversation_snapshot)?,
            partners: PartnerDirectory::new(seed.partners),
            scheduler: SessionScheduler::new(config.scheduling.clone()),
            persistence: Some(Persistence {
                session_repository,
                conversation_repository,
            }),
        })
    }

    /// Writes both stores to their repositories. Does nothing for an
    /// in-memory application.
    pub async fn save(&self) -> Result<()> {
        let Some(persistence) = &self.persistence else {
            tracing::debug!("[TandemApp] Persistence disabled, skipping save");
            return Ok(());
        };

        persistence
            .session_repository
            .save(&self.sessions.snapshot())
            .await?;
        persistence
            .conversation_repository
            .save(&self.conversations.snapshot())
            .await?;

        tracing::info!("[TandemApp] State saved");
        Ok(())
    }

    pub fn is_persistent(&self) -> bool {
        self.persistence.is_some()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionStore {
        &mut self.sessions
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    pub fn conversations_mut(&mut self) -> &mut ConversationStore {
        &mut self.conversations
    }

    pub fn partners(&self) -> &PartnerDirectory {
        &self.partners
    }

    pub fn scheduler(&self) -> &SessionScheduler {
        &self.scheduler
    }

    /// Validates a scheduling request and stores the session.
    pub fn schedule_session(&mut self, request: ScheduleRequest) -> Result<ScheduleOutcome> {
        self.scheduler
            .schedule(&mut self.sessions, &self.partners, request)
    }
}
