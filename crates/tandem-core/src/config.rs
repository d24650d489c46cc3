//! Application configuration model.
//!
//! Every section falls back to its defaults, so an empty `config.toml` (or no
//! file at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Persistence settings. Disabled by default: state lives only as long as
/// the process.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct SeedConfig {
    /// TOML seed file used instead of the built-in demo data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SchedulingConfig {
    /// Delay between storing a scheduled session and reporting completion.
    #[serde(default = "default_submission_delay_ms")]
    pub submission_delay_ms: u64,
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
    #[serde(default = "default_allowed_durations")]
    pub allowed_durations: Vec<u32>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            submission_delay_ms: default_submission_delay_ms(),
            default_duration_minutes: default_duration_minutes(),
            allowed_durations: default_allowed_durations(),
        }
    }
}

fn default_submission_delay_ms() -> u64 {
    1000
}

fn default_duration_minutes() -> u32 {
    30
}

fn default_allowed_durations() -> Vec<u32> {
    vec![15, 30, 45, 60]
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
