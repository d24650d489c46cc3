//! Seed data for initializing the stores.
//!
//! The seed is a plain TOML document so it can be swapped for a file on disk
//! (or, later, an API response) without touching store logic.

use crate::conversation::{ConversationSnapshot, Thread};
use crate::error::{Result, TandemError};
use crate::partner::Partner;
use crate::session::{Session, SessionSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const DEMO_SEED: &str = include_str!("demo.toml");

/// Initial contents for the partner directory and both stores.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub upcoming_sessions: Vec<Session>,
    #[serde(default)]
    pub past_sessions: Vec<Session>,
    #[serde(default)]
    pub threads: Vec<Thread>,
}

impl SeedData {
    /// Parses and validates a seed document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let seed: SeedData = toml::from_str(content)?;
        seed.validate()?;
        Ok(seed)
    }

    /// The built-in demo seed: four partners, four sessions, four threads.
    pub fn demo() -> Result<Self> {
        Self::from_toml_str(DEMO_SEED)
    }

    /// Checks every invariant the stores rely on.
    pub fn validate(&self) -> Result<()> {
        let mut partner_ids = HashSet::new();
        for partner in &self.partners {
            if !partner_ids.insert(partner.id.as_str()) {
                return Err(TandemError::invalid_input(format!(
                    "duplicate partner id '{}'",
                    partner.id
                )));
            }
        }

        self.session_snapshot().validate()?;
        self.conversation_snapshot().validate()
    }

    pub fn session_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.upcoming_sessions.clone(), self.past_sessions.clone())
    }

    /// Threads with summaries derived from their last messages.
    pub fn conversation_snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot::from_threads(self.threads.clone())
    }
}
