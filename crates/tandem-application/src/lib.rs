//! Application layer for Tandem.
//!
//! This crate owns the in-memory stores the presentation layer reads from and
//! forwards user actions into, plus the use cases that coordinate them with
//! the repositories declared in `tandem-core`.

pub mod app;
pub mod conversation;
pub mod partner_directory;
pub mod session;

pub use app::TandemApp;
pub use conversation::{ConversationEvent, ConversationStore};
pub use partner_directory::PartnerDirectory;
pub use session::{ScheduleOutcome, ScheduleRequest, SessionEvent, SessionScheduler, SessionStore};
