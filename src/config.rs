//! Runtime configuration.
//!
//! Settings come from `config.toml` in the platform config directory
//! (`~/.config/watchlist_tui/config.toml` on Linux), then environment
//! overrides are applied on top:
//!
//! ```toml
//! api_key = "your_key_here"
//! endpoint = "https://www.omdbapi.com/"
//! log_filter = "watchlist_tui=debug,warn"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_ENDPOINT: &str = "https://www.omdbapi.com/";
const APP_DIR: &str = "watchlist_tui";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            log_filter: None,
        }
    }
}

impl Config {
    /// Location of the config file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Reads the config file at `path`. A missing file is not an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Loads the default config file and applies `OMDB_API_KEY` / `OMDB_ENDPOINT`.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(
            std::env::var("OMDB_API_KEY").ok(),
            std::env::var("OMDB_ENDPOINT").ok(),
        );
        Ok(config)
    }

    pub fn apply_overrides(&mut self, api_key: Option<String>, endpoint: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
    }

    /// The configured key, ignoring blank strings.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Directory for rolling log files.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR).join("logs"))
        .unwrap_or_else(|| PathBuf::from(".logs"))
}
