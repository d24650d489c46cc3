//! Conversation application services.

mod store;

pub use store::{ConversationEvent, ConversationStore};
