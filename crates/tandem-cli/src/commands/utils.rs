use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use std::path::Path;
use std::sync::Arc;
use tandem_application::TandemApp;
use tandem_core::config::AppConfig;
use tandem_infrastructure::{
    ConfigService, TandemPaths, TomlConversationRepository, TomlSessionRepository, load_seed,
};

/// Loads the explicit config file, or the platform one if present.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let service = match path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    service
        .load()
        .with_context(|| format!("Failed to load config from {}", service.path().display()))
}

/// Builds the application, backed by the data directory when storage is enabled.
pub async fn open_app(config: &AppConfig) -> Result<TandemApp> {
    let seed = load_seed(&config.seed).context("Failed to load seed data")?;

    if !config.storage.enabled {
        return Ok(TandemApp::from_seed(seed, config)?);
    }

    let data_dir = TandemPaths::resolve_data_dir(config)?;
    tracing::info!("[tandem] Using data directory {}", data_dir.display());
    let app = TandemApp::load(
        seed,
        config,
        Arc::new(TomlSessionRepository::new(&data_dir)),
        Arc::new(TomlConversationRepository::new(&data_dir)),
    )
    .await
    .with_context(|| format!("Failed to load state from {}", data_dir.display()))?;
    Ok(app)
}

pub fn format_datetime(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%a %b %-d, %Y %H:%M").to_string()
}

pub fn format_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}
