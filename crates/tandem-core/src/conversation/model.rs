//! Thread and conversation summary models.

use super::message::{LOCAL_SENDER_ID, Message};
use crate::error::{Result, TandemError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Current on-disk version of [`ConversationSnapshot`].
pub const CONVERSATION_SNAPSHOT_VERSION: u32 = 1;

/// Presence of a conversation partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    #[default]
    Offline,
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenceStatus::Online => f.write_str("Online"),
            PresenceStatus::Offline => f.write_str("Offline"),
        }
    }
}

/// The partner on the other side of a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: PresenceStatus,
}

/// The ordered message history between the local user and one partner.
///
/// Messages are kept in insertion order, which is also chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub conversation_id: String,
    pub participant: Participant,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Thread {
    pub fn new(conversation_id: impl Into<String>, participant: Participant) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            participant,
            messages: Vec::new(),
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn contains_message_id(&self, id: &str) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }

    /// Checks the thread-local invariants: the participant id is not the
    /// reserved local sender and message ids are unique.
    pub fn validate(&self) -> Result<()> {
        if self.participant.id == LOCAL_SENDER_ID {
            return Err(TandemError::invalid_input(format!(
                "participant id '{}' is reserved for the local user (thread '{}')",
                LOCAL_SENDER_ID, self.conversation_id
            )));
        }

        let mut seen = HashSet::new();
        for message in &self.messages {
            if !seen.insert(message.id.as_str()) {
                return Err(TandemError::invalid_input(format!(
                    "duplicate message id '{}' in thread '{}'",
                    message.id, self.conversation_id
                )));
            }
        }
        Ok(())
    }
}

/// Snapshot of a thread's most recent message for list rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMessage {
    pub text: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
}

/// Lightweight projection of a thread used by the conversation list.
///
/// Derived from the thread once at initialization; afterwards it is updated
/// by send and read actions, never re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub participant: Participant,
    /// `None` only for a thread that was seeded without messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<LastMessage>,
}

impl ConversationSummary {
    /// Builds the initial summary for a thread. Seeded history counts as read.
    pub fn from_thread(thread: &Thread) -> Self {
        Self {
            id: thread.conversation_id.clone(),
            participant: thread.participant.clone(),
            last_message: thread.last_message().map(|m| LastMessage {
                text: m.text.clone(),
                sent_at: m.sent_at,
                is_read: true,
            }),
        }
    }

    pub fn is_unread(&self) -> bool {
        self.last_message.as_ref().is_some_and(|m| !m.is_read)
    }
}

/// Serializable state of the conversation store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    #[serde(default = "default_snapshot_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_conversation_id: Option<String>,
    #[serde(default)]
    pub threads: Vec<Thread>,
    #[serde(default)]
    pub conversations: Vec<ConversationSummary>,
}

fn default_snapshot_version() -> u32 {
    CONVERSATION_SNAPSHOT_VERSION
}

impl ConversationSnapshot {
    /// Builds a snapshot whose summaries are derived from the threads.
    pub fn from_threads(threads: Vec<Thread>) -> Self {
        let conversations = threads.iter().map(ConversationSummary::from_thread).collect();
        Self {
            version: CONVERSATION_SNAPSHOT_VERSION,
            threads,
            conversations,
            active_conversation_id: None,
        }
    }

    /// Checks version, thread invariants and that every summary and the
    /// active pointer reference an existing thread. A summary must carry the
    /// same participant as its thread.
    pub fn validate(&self) -> Result<()> {
        if self.version > CONVERSATION_SNAPSHOT_VERSION {
            return Err(TandemError::serialization(
                "snapshot",
                format!(
                    "conversation snapshot version {} is newer than supported version {}",
                    self.version, CONVERSATION_SNAPSHOT_VERSION
                ),
            ));
        }

        let mut participants = HashMap::new();
        for thread in &self.threads {
            thread.validate()?;
            if participants
                .insert(thread.conversation_id.as_str(), &thread.participant)
                .is_some()
            {
                return Err(TandemError::invalid_input(format!(
                    "duplicate thread id '{}'",
                    thread.conversation_id
                )));
            }
        }

        let mut summary_ids = HashSet::new();
        for summary in &self.conversations {
            let Some(participant) = participants.get(summary.id.as_str()) else {
                return Err(TandemError::not_found("Thread", summary.id.clone()));
            };
            if *participant != &summary.participant {
                return Err(TandemError::invalid_input(format!(
                    "summary '{}' names a different participant than its thread",
                    summary.id
                )));
            }
            if !summary_ids.insert(summary.id.as_str()) {
                return Err(TandemError::invalid_input(format!(
                    "duplicate conversation summary '{}'",
                    summary.id
                )));
            }
        }

        if let Some(active) = &self.active_conversation_id {
            if !participants.contains_key(active.as_str()) {
                return Err(TandemError::not_found("Thread", active.clone()));
            }
        }

        Ok(())
    }
}
