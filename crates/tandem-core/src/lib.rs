//! Domain layer for Tandem.
//!
//! Pure data types, invariants and repository interfaces. Nothing in this
//! crate performs I/O.

pub mod config;
pub mod conversation;
pub mod error;
pub mod partner;
pub mod seed;
pub mod session;

// Re-export common error type
pub use error::TandemError;
