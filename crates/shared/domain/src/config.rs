use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level application configuration shared across the front ends.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub storage: StorageConfig,
    pub relay: RelayConfig,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where the three filter settings are persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub settings_path: PathBuf,
}

/// Per-instance queue depth of the settings relay.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub capacity: usize,
}

/// Engine knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound for the initial settings read; slower reads count as failures.
    pub config_read_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub env_filter: Option<String>,
    /// Rolling log files are written here when set.
    pub directory: Option<PathBuf>,
    pub json: bool,
    /// `minutely`, `hourly`, `daily` or `never`.
    pub rotation: String,
    pub max_files: usize,
}

// --- Default ---

impl Default for StorageConfig {
    fn default() -> Self {
        Self { settings_path: PathBuf::from("demoji-settings.json") }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self { capacity: 16 }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { config_read_timeout_ms: 1_500 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            env_filter: None,
            directory: None,
            json: false,
            rotation: "daily".to_owned(),
            max_files: 10,
        }
    }
}
