// YAML configuration for the todo front-ends

use crate::error::{ConfigSource, Result, TodoError};
use crate::store::{DEFAULT_PATH, Store};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_DIR: &str = "todolist";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Backing todo file
    pub file: PathBuf,
    /// Create an empty file (and its directory) when it is missing
    pub create_if_missing: bool,
    /// Prefix new todos with `[MM/DD HH:MM]`
    pub timestamp_entries: bool,
    /// Where JSON exports are written
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_PATH),
            create_if_missing: true,
            timestamp_entries: false,
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Per-user config location, e.g. `~/.config/todolist/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit file; it must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_err = |source: ConfigSource| TodoError::Config {
            path: path.to_path_buf(),
            source,
        };

        let content = fs::read_to_string(path).map_err(|e| config_err(e.into()))?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| config_err(e.into()))?;

        debug!(path = ?path, "Loaded config");
        Ok(config)
    }

    /// Explicit path if given, else the per-user file if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Store over the configured file
    pub fn store(&self) -> Store {
        Store::new(&self.file)
    }
}
