use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use super::LeaderboardConfig;

const APP_DIR: &str = "streakboard";
const CONFIG_FILE: &str = "config.json";

/// Every 15 minutes, on the minute. Six fields: sec min hour day month weekday.
pub const DEFAULT_RECOMPUTE_CRON: &str = "0 */15 * * * *";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Settings read from `config.json`. Missing keys fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: LogLevel,
    pub leaderboard_batch_size: usize,
    pub recompute_cron: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            database_path: data_dir.join("streakboard.db"),
            log_dir: data_dir.join("logs"),
            log_level: LogLevel::Info,
            leaderboard_batch_size: LeaderboardConfig::DEFAULT_BATCH_SIZE,
            recompute_cron: DEFAULT_RECOMPUTE_CRON.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the per-user config file when `None`.
    ///
    /// A missing file yields defaults; a malformed or invalid one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config {:?}", config_path))?;
            serde_json::from_str::<AppConfig>(&content)
                .with_context(|| format!("Failed to parse config {:?}", config_path))?
        } else {
            AppConfig::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.leaderboard_batch_size == 0 {
            bail!("leaderboard_batch_size must be at least 1");
        }
        if self.recompute_cron.trim().is_empty() {
            bail!("recompute_cron cannot be empty");
        }
        if self.database_path.as_os_str().is_empty() {
            bail!("database_path cannot be empty");
        }
        Ok(())
    }

    pub fn leaderboard_config(&self) -> Result<LeaderboardConfig> {
        Ok(LeaderboardConfig::new(self.leaderboard_batch_size)?)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!(config_path = %path.display(), "config saved");
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
