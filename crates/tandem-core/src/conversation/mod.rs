//! Conversation domain module.
//!
//! This module contains message threads, the summaries shown in the
//! conversation list, and the repository interface used to persist them.
//!
//! # Module Structure
//!
//! - `message`: Individual messages and their sender (`Message`, `Sender`)
//! - `model`: Threads, participants and summaries
//! - `repository`: Repository trait for conversation persistence

mod message;
mod model;
mod repository;

// Re-export public API
pub use message::{Message, Sender, LOCAL_SENDER_ID};
pub use model::{
    ConversationSnapshot, ConversationSummary, LastMessage, Participant, PresenceStatus, Thread,
    CONVERSATION_SNAPSHOT_VERSION,
};
pub use repository::ConversationRepository;
