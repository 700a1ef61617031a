//! `studio.ron` configuration for the terminal front end.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use studio_logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "./studio.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub api_base: String,
    /// Base url the `/Videos/...` candidate paths are probed and played from.
    pub asset_base: String,
    pub storage_dir: PathBuf,
    pub session_id: String,
    pub player_command: Option<String>,
    pub log_destination: LogTarget,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:4000".to_string(),
            asset_base: "http://localhost:3000".to_string(),
            storage_dir: PathBuf::from("./studio_data"),
            session_id: "default".to_string(),
            player_command: None,
            log_destination: LogTarget::File,
        }
    }
}

/// Result of reading the config file. The logger is not up yet when the
/// config is read, so problems are handed back for logging later.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: StudioConfig,
    pub warning: Option<String>,
}

pub fn load_config(path: &Path) -> LoadedConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return LoadedConfig {
                config: StudioConfig::default(),
                warning: None,
            };
        }
        Err(err) => {
            return LoadedConfig {
                config: StudioConfig::default(),
                warning: Some(format!("Failed to read config {:?}: {}", path, err)),
            };
        }
    };

    match ron::from_str(&content) {
        Ok(config) => LoadedConfig {
            config,
            warning: None,
        },
        Err(err) => LoadedConfig {
            config: StudioConfig::default(),
            warning: Some(format!("Failed to parse config {:?}: {}", path, err)),
        },
    }
}
