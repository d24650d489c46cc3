//! Session application services.
//!
//! This module contains the in-memory session store and the scheduling use
//! case that validates form input before handing it to the store.

mod scheduler;
mod store;

pub use scheduler::{ScheduleOutcome, ScheduleRequest, SessionScheduler};
pub use store::{SessionEvent, SessionStore};
