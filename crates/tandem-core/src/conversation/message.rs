//! Message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire value identifying the local user as a sender.
pub const LOCAL_SENDER_ID: &str = "me";

/// Who wrote a message.
///
/// Serialized as a plain string: `"me"` for the local user, otherwise the
/// participant id. Participant ids therefore must never be `"me"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    /// The local user.
    Me,
    /// The partner on the other side of the thread, by participant id.
    Participant(String),
}

impl Sender {
    pub fn is_me(&self) -> bool {
        matches!(self, Sender::Me)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Sender::Me => LOCAL_SENDER_ID,
            Sender::Participant(id) => id,
        }
    }
}

impl From<String> for Sender {
    fn from(value: String) -> Self {
        if value == LOCAL_SENDER_ID {
            Sender::Me
        } else {
            Sender::Participant(value)
        }
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        match value {
            Sender::Me => LOCAL_SENDER_ID.to_string(),
            Sender::Participant(id) => id,
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique within the owning thread only.
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Creates a message written by the local user.
    pub fn outgoing(id: impl Into<String>, text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            sender: Sender::Me,
            text: text.into(),
            sent_at,
        }
    }
}
