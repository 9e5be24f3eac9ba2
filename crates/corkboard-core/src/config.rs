//! Client configuration, stored as a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// WebSocket endpoint of the board server.
    pub server_url: String,
    /// Axis movement below this many board units is treated as click
    /// jitter and produces no update command.
    pub drag_epsilon: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "ws://localhost:8787/ws".to_string(),
            drag_epsilon: crate::sync::DRAG_EPSILON,
        }
    }
}

impl ClientConfig {
    /// Load settings from a file. A missing file yields the defaults; a
    /// malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&json)
            .map_err(|e| ConfigError::Parse(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Save settings to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Io(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        let json =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| ConfigError::Io(format!("failed to write {}: {}", path.display(), e)))
    }

    /// Default config file location.
    ///
    /// On Unix: `~/.config/corkboard/config.json`
    /// On Windows: `%APPDATA%\corkboard\config.json`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("corkboard").join("config.json"))
    }
}
