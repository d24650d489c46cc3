//! Practice session domain model.

use crate::error::{Result, TandemError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Current on-disk version of [`SessionSnapshot`].
pub const SESSION_SNAPSHOT_VERSION: u32 = 1;

/// A scheduled practice meeting between the user and a partner.
///
/// Sessions are immutable once stored. Whether a session is upcoming or past
/// is decided by which list it lives in, never by comparing `scheduled_at`
/// against the current time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier across the upcoming and past lists
    pub id: String,
    /// Display name of the practice partner
    pub partner_name: String,
    /// Absolute start time of the session
    pub scheduled_at: DateTime<Utc>,
    /// Length of the session in minutes
    pub duration_minutes: u32,
    /// Language being practiced
    pub language: String,
    /// Conversation topic
    pub topic: String,
    /// Free-form preparation notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A session as submitted by the scheduling layer, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSession {
    pub partner_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub language: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewSession {
    /// Turns the input into a stored session under the given id.
    pub fn into_session(self, id: String) -> Session {
        Session {
            id,
            partner_name: self.partner_name,
            scheduled_at: self.scheduled_at,
            duration_minutes: self.duration_minutes,
            language: self.language,
            topic: self.topic,
            notes: self.notes,
        }
    }
}

/// Serializable state of the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default = "default_snapshot_version")]
    pub version: u32,
    #[serde(default)]
    pub upcoming: Vec<Session>,
    #[serde(default)]
    pub past: Vec<Session>,
}

fn default_snapshot_version() -> u32 {
    SESSION_SNAPSHOT_VERSION
}

impl SessionSnapshot {
    pub fn new(upcoming: Vec<Session>, past: Vec<Session>) -> Self {
        Self {
            version: SESSION_SNAPSHOT_VERSION,
            upcoming,
            past,
        }
    }

    /// Checks the version and that ids are unique across both lists.
    pub fn validate(&self) -> Result<()> {
        if self.version > SESSION_SNAPSHOT_VERSION {
            return Err(TandemError::serialization(
                "snapshot",
                format!(
                    "session snapshot version {} is newer than supported version {}",
                    self.version, SESSION_SNAPSHOT_VERSION
                ),
            ));
        }

        let mut seen = HashSet::new();
        for session in self.upcoming.iter().chain(self.past.iter()) {
            if !seen.insert(session.id.as_str()) {
                return Err(TandemError::invalid_input(format!(
                    "duplicate session id '{}'",
                    session.id
                )));
            }
        }
        Ok(())
    }
}
