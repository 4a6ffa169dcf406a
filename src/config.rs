use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::downloader::{DEFAULT_MAX_BYTES, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

/// Directory images are stored in, relative to the working directory.
pub const DEFAULT_DIRECTORY: &str = "Fetched_Images";

/// Settings for a fetch, optionally read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Target directory for stored images.
    pub directory: PathBuf,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Largest body accepted, in bytes.
    pub max_bytes: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

/// `$XDG_CONFIG_HOME/image-fetcher/config.toml`, whether or not it exists.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("image-fetcher")?;
    Ok(xdg_dirs.get_config_home().join("config.toml"))
}

pub fn load_from(path: &Path) -> Result<FetcherConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Loads `explicit` if given, else the XDG config file if present, else defaults.
pub fn load(explicit: Option<&Path>) -> Result<FetcherConfig> {
    if let Some(path) = explicit {
        return load_from(path);
    }

    match config_path() {
        Ok(path) if path.exists() => {
            tracing::debug!("loading config from {}", path.display());
            load_from(&path)
        }
        Ok(_) => Ok(FetcherConfig::default()),
        Err(err) => {
            tracing::debug!("no config directory available: {:#}", err);
            Ok(FetcherConfig::default())
        }
    }
}
