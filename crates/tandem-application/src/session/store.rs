use tandem_core::error::{Result, TandemError};
use tandem_core::session::{NewSession, Session, SessionSnapshot};
use tokio::sync::broadcast;
use uuid::Uuid;

const EVENT_CAPACITY: usize = 64;

/// Change notifications published by [`SessionStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session was inserted at the head of the upcoming list.
    Added { id: String },
}

/// Owns the upcoming and past session lists.
///
/// `SessionStore` is responsible for:
/// - Handing out read-only views of both lists
/// - Assigning ids to newly scheduled sessions
/// - Notifying subscribers after every insertion
///
/// The two lists are seeded independently and sessions are never moved
/// between them.
pub struct SessionStore {
    upcoming: Vec<Session>,
    past: Vec<Session>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Creates a store from the given lists.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if an id appears more than once across both lists.
    pub fn new(upcoming: Vec<Session>, past: Vec<Session>) -> Result<Self> {
        Self::from_snapshot(SessionSnapshot::new(upcoming, past))
    }

    /// Restores a store from a persisted or seeded snapshot.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self> {
        snapshot.validate()?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        tracing::debug!(
            "[SessionStore] Initialized with {} upcoming and {} past sessions",
            snapshot.upcoming.len(),
            snapshot.past.len()
        );

        Ok(Self {
            upcoming: snapshot.upcoming,
            past: snapshot.past,
            events,
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.upcoming.clone(), self.past.clone())
    }

    /// Upcoming sessions, most recently scheduled first.
    pub fn upcoming(&self) -> &[Session] {
        &self.upcoming
    }

    pub fn past(&self) -> &[Session] {
        &self.past
    }

    /// Finds a session in the upcoming list, then the past list.
    pub fn find(&self, id: &str) -> Result<&Session> {
        self.upcoming
            .iter()
            .chain(self.past.iter())
            .find(|s| s.id == id)
            .ok_or_else(|| TandemError::not_found("Session", id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_ok()
    }

    /// Total number of sessions in both lists.
    pub fn len(&self) -> usize {
        self.upcoming.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores a new session at the head of the upcoming list.
    ///
    /// The input is accepted as-is; validating duration and date is the
    /// scheduling layer's job (see [`super::SessionScheduler`]).
    ///
    /// # Returns
    ///
    /// The stored record, including its freshly assigned id.
    pub fn add_session(&mut self, input: NewSession) -> Session {
        let id = self.next_id();
        let session = input.into_session(id);

        tracing::debug!(
            "[SessionStore] Adding session: id={}, partner={}, language={}",
            session.id,
            session.partner_name,
            session.language
        );

        self.upcoming.insert(0, session.clone());
        let _ = self.events.send(SessionEvent::Added {
            id: session.id.clone(),
        });

        session
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Generates an id that is not used in either list.
    fn next_id(&self) -> String {
        loop {
            let id = format!("session-{}", Uuid::new_v4());
            if !self.contains(&id) {
                return id;
            }
        }
    }
}
