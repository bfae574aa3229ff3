use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable overriding the snapshot directory
pub const HOME_ENV_VAR: &str = "LEGAL_CASE_EXPLORER_HOME";

const APP_DIR_NAME: &str = "legal-case-explorer";

/// Snapshot directory from `LEGAL_CASE_EXPLORER_HOME`, if set and non-empty
pub fn home_override() -> Option<PathBuf> {
    env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Platform data directory for snapshots
pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

/// Platform config directory, if the platform has one
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME))
}
