//! Tracker configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_DATA_FILE;

/// Environment variable that overrides [`TrackerConfig::data_file`].
pub const DATA_FILE_ENV: &str = "BANDTRACK_DATA_FILE";

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = "bandtrack.toml";

/// Top-level bandtrack configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Backing file for tracked scores.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// How many recent entries to list per skill.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}
fn default_recent_limit() -> usize {
    5
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            recent_limit: default_recent_limit(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `bandtrack.toml` in the current directory
/// 2. `~/.config/bandtrack/config.toml`
///
/// `BANDTRACK_DATA_FILE` overrides the data file from either.
pub fn load_config() -> Result<TrackerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TrackerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TrackerConfig::default(),
    };

    if let Ok(data_file) = std::env::var(DATA_FILE_ENV) {
        if !data_file.is_empty() {
            config.data_file = PathBuf::from(data_file);
        }
    }

    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<TrackerConfig> {
    let config: TrackerConfig = toml::from_str(content)?;
    anyhow::ensure!(config.recent_limit >= 1, "recent_limit must be at least 1");
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("bandtrack"))
}
