//! Practice session domain module.
//!
//! # Module Structure
//!
//! - `model`: Scheduled session types (`Session`, `NewSession`, `SessionSnapshot`)
//! - `repository`: Repository trait for session persistence
//!
//! # Usage
//!
//! ```ignore
//! use tandem_core::session::{NewSession, Session, SessionRepository, SessionSnapshot};
//! ```

mod model;
mod repository;

// Re-export public API
pub use model::{NewSession, Session, SessionSnapshot, SESSION_SNAPSHOT_VERSION};
pub use repository::SessionRepository;
