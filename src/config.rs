use crate::error::{EtlError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Pipeline configuration, loaded from `config.toml`.
///
/// Every field has a default so a missing file or a partial file both work;
/// there is no global mutable state, the struct is passed to the orchestrator
/// at construction.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Minutes between scheduled pipeline runs.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    /// Directory receiving the per-run CSV snapshots and JSON run logs.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
}

fn default_interval_minutes() -> u64 {
    10
}

fn default_backup_dir() -> String {
    "backups".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            backup_dir: default_backup_dir(),
        }
    }
}

impl Config {
    /// Loads configuration from the given TOML file, falling back to defaults
    /// when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!("failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
