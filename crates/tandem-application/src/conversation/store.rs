use chrono::Utc;
use std::collections::HashMap;
use tandem_core::conversation::{
    CONVERSATION_SNAPSHOT_VERSION, ConversationSnapshot, ConversationSummary, LastMessage,
    Message, Thread,
};
use tandem_core::error::{Result, TandemError};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

/// Change notifications published by [`ConversationStore`].
///
/// An event is only published when observable state actually changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationEvent {
    /// The active pointer moved to a different conversation.
    ActiveChanged { conversation_id: String },
    /// A summary's last message flipped from unread to read.
    MarkedRead { conversation_id: String },
    /// The local user appended a message to a thread.
    MessageSent {
        conversation_id: String,
        message_id: String,
    },
}

/// Owns message threads, their list summaries, and the active pointer.
///
/// `ConversationStore` is responsible for:
/// - Exposing read-only views of summaries, threads and the active id
/// - Moving the active pointer, which also marks that conversation read
/// - Appending messages from the local user and updating the summary
///
/// Unknown conversation ids are rejected with `NotFound` and empty message
/// text with `InvalidInput`. A rejected call changes nothing and publishes
/// no event.
pub struct ConversationStore {
    threads: HashMap<String, Thread>,
    /// Summaries in list order. Every thread has exactly one.
    conversations: Vec<ConversationSummary>,
    active_conversation_id: Option<String>,
    next_message_seq: u64,
    events: broadcast::Sender<ConversationEvent>,
}

impl ConversationStore {
    /// Restores a store from a persisted or seeded snapshot.
    ///
    /// Threads without a summary get one derived from their last message and
    /// appended to the end of the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot violates a thread or reference
    /// invariant (see [`ConversationSnapshot::validate`]).
    pub fn from_snapshot(snapshot: ConversationSnapshot) -> Result<Self> {
        snapshot.validate()?;

        let mut conversations = snapshot.conversations;
        for thread in &snapshot.threads {
            if !conversations.iter().any(|c| c.id == thread.conversation_id) {
                conversations.push(ConversationSummary::from_thread(thread));
            }
        }

        let threads: HashMap<String, Thread> = snapshot
            .threads
            .into_iter()
            .map(|t| (t.conversation_id.clone(), t))
            .collect();

        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        tracing::debug!(
            "[ConversationStore] Initialized with {} threads, active={:?}",
            threads.len(),
            snapshot.active_conversation_id
        );

        Ok(Self {
            threads,
            conversations,
            active_conversation_id: snapshot.active_conversation_id,
            next_message_seq: 1,
            events,
        })
    }

    /// Restores a store and immediately activates `initial_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `initial_id` does not name a thread.
    pub fn with_initial_active(snapshot: ConversationSnapshot, initial_id: &str) -> Result<Self> {
        let mut store = Self::from_snapshot(snapshot)?;
        store.set_active_conversation(initial_id)?;
        Ok(store)
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        let threads = self
            .conversations
            .iter()
            .filter_map(|c| self.threads.get(&c.id).cloned())
            .collect();

        ConversationSnapshot {
            threads,
            conversations: self.conversations.clone(),
            active_conversation_id: self.active_conversation_id.clone(),
            version: CONVERSATION_SNAPSHOT_VERSION,
        }
    }

    // ============================================================================
    // Read access
    // ============================================================================

    /// Summaries in list order.
    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    pub fn threads(&self) -> &HashMap<String, Thread> {
        &self.threads
    }

    pub fn thread(&self, id: &str) -> Result<&Thread> {
        self.threads
            .get(id)
            .ok_or_else(|| TandemError::not_found("Conversation", id))
    }

    pub fn summary(&self, id: &str) -> Result<&ConversationSummary> {
        self.conversations
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| TandemError::not_found("Conversation", id))
    }

    pub fn active_conversation_id(&self) -> Option<&str> {
        self.active_conversation_id.as_deref()
    }

    pub fn active_thread(&self) -> Option<&Thread> {
        self.active_conversation_id
            .as_ref()
            .and_then(|id| self.threads.get(id))
    }

    /// The first conversation in list order, if any.
    pub fn first_conversation_id(&self) -> Option<&str> {
        self.conversations.first().map(|c| c.id.as_str())
    }

    /// Summaries whose participant name contains `query`, ignoring case.
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&ConversationSummary> {
        let query = query.trim().to_lowercase();
        self.conversations
            .iter()
            .filter(|c| c.participant.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Resolves a partner's display name to their conversation id.
    pub fn find_by_participant_name(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.conversations
            .iter()
            .find(|c| c.participant.name.eq_ignore_ascii_case(name))
            .map(|c| c.id.as_str())
    }

    pub fn unread_count(&self) -> usize {
        self.conversations.iter().filter(|c| c.is_unread()).count()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.events.subscribe()
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Points the store at a conversation and marks it read.
    ///
    /// Re-activating the current conversation publishes no `ActiveChanged`
    /// event but still marks it read.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` does not name a thread; the active pointer
    /// is left as it was.
    pub fn set_active_conversation(&mut self, id: &str) -> Result<()> {
        if !self.threads.contains_key(id) {
            tracing::warn!(
                "[ConversationStore] Ignoring unknown active conversation: {}",
                id
            );
            return Err(TandemError::not_found("Conversation", id));
        }

        if self.active_conversation_id.as_deref() != Some(id) {
            tracing::debug!("[ConversationStore] Active conversation -> {}", id);
            self.active_conversation_id = Some(id.to_string());
            let _ = self.events.send(ConversationEvent::ActiveChanged {
                conversation_id: id.to_string(),
            });
        }

        self.mark_conversation_as_read(id)?;
        Ok(())
    }

    /// Marks a conversation's last message as read.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The summary was unread and is now read
    /// - `Ok(false)`: Already read (or no messages); nothing changed, no event
    /// - `Err(_)`: Unknown conversation id
    pub fn mark_conversation_as_read(&mut self, id: &str) -> Result<bool> {
        let summary = self
            .conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TandemError::not_found("Conversation", id))?;

        let Some(last) = summary.last_message.as_mut() else {
            return Ok(false);
        };
        if last.is_read {
            return Ok(false);
        }

        last.is_read = true;
        tracing::debug!("[ConversationStore] Marked conversation read: {}", id);
        let _ = self.events.send(ConversationEvent::MarkedRead {
            conversation_id: id.to_string(),
        });
        Ok(true)
    }

    /// Appends a message from the local user and updates the summary.
    ///
    /// The message text is stored as given; the summary's last message takes
    /// the same text and timestamp and is always read.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `text` is empty or whitespace-only
    /// - `NotFound` if `id` does not name a thread
    pub fn send_message(&mut self, id: &str, text: &str) -> Result<Message> {
        if text.trim().is_empty() {
            tracing::warn!("[ConversationStore] Rejected empty message for {}", id);
            return Err(TandemError::invalid_input("message text is empty"));
        }

        let thread = self
            .threads
            .get_mut(id)
            .ok_or_else(|| TandemError::not_found("Conversation", id))?;
        let summary = self
            .conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TandemError::internal(format!("thread '{}' has no summary", id)))?;

        let message_id = next_message_id(&mut self.next_message_seq, thread);
        let message = Message::outgoing(message_id, text, Utc::now());

        thread.messages.push(message.clone());
        summary.last_message = Some(LastMessage {
            text: message.text.clone(),
            sent_at: message.sent_at,
            is_read: true,
        });

        tracing::debug!(
            "[ConversationStore] Sent message {} to conversation {}",
            message.id,
            id
        );
        let _ = self.events.send(ConversationEvent::MessageSent {
            conversation_id: id.to_string(),
            message_id: message.id.clone(),
        });

        Ok(message)
    }
}

/// Next `msg-<n>` id not already used in `thread`.
///
/// The counter is per store and strictly increasing, so two sends in the
/// same instant still get distinct ids.
fn next_message_id(seq: &mut u64, thread: &Thread) -> String {
    loop {
        let id = format!("msg-{}", seq);
        *seq += 1;
        if !thread.contains_message_id(&id) {
            return id;
        }
    }
}
