//! Application configuration loaded from TOML.
//!
//! Every section and field is optional; missing values fall back to defaults.
//!
//! ```toml
//! [search]
//! debounce_ms = 500
//! history_capacity = 10
//! request_timeout_ms = 10000   # 0 disables the timeout
//! retry_transient = true
//!
//! [storage]
//! dir = "/var/lib/legal-case-explorer"
//!
//! [fixtures]
//! latency_ms = 1000
//! analysis_latency_ms = 2000
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_HISTORY_CAPACITY;
use crate::utils::environment;

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub storage: StorageConfig,
    pub fixtures: FixtureConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub history_capacity: usize,
    pub request_timeout_ms: u64,
    pub retry_transient: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            request_timeout_ms: 10_000,
            retry_transient: true,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
}

/// Simulated latency of the fixture-backed services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    pub latency_ms: u64,
    pub analysis_latency_ms: u64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self { latency_ms: 1000, analysis_latency_ms: 2000 }
    }
}

impl FixtureConfig {
    /// No simulated delay at all
    pub fn instant() -> Self {
        Self { latency_ms: 0, analysis_latency_ms: 0 }
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn analysis_latency(&self) -> Duration {
        Duration::from_millis(self.analysis_latency_ms)
    }
}

impl AppConfig {
    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one, the default location
    /// (`<config dir>/legal-case-explorer/config.toml`) is read when present,
    /// otherwise defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::load_from(path)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Directory holding persisted store snapshots
    ///
    /// Precedence: `LEGAL_CASE_EXPLORER_HOME`, then `storage.dir`, then the
    /// platform data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = environment::home_override() {
            return Ok(dir);
        }
        if let Some(dir) = &self.storage.dir {
            return Ok(dir.clone());
        }
        environment::default_data_dir()
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    environment::default_config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}
