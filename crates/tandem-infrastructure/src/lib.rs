//! Infrastructure layer for Tandem: filesystem paths, atomic TOML storage,
//! and the TOML-backed repositories.

pub mod config_service;
pub mod paths;
pub mod seed_loader;
pub mod storage;
pub mod toml_conversation_repository;
pub mod toml_session_repository;

pub use crate::config_service::ConfigService;
pub use crate::paths::TandemPaths;
pub use crate::seed_loader::load_seed;
pub use crate::toml_conversation_repository::TomlConversationRepository;
pub use crate::toml_session_repository::TomlSessionRepository;
