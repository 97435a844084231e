// Configuration module for jsonq
// Loads ~/.config/jsonq/config.toml; every section and key is optional

mod types;

pub use types::{
    ClipboardBackend, ClipboardConfig, Config, DisplayConfig, HistoryConfig, QueryConfig,
    StorageConfig,
};

use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/jsonq/config.toml
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    match get_config_path() {
        Some(path) => load_config_from_path(&path),
        None => ConfigResult {
            config: Config::default(),
            warning: None,
        },
    }
}

pub fn load_config_from_path(config_path: &Path) -> ConfigResult {
    #[cfg(debug_assertions)]
    log::debug!("Loading config from {:?}", config_path);

    // If file doesn't exist, return defaults silently
    if !config_path.exists() {
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            #[cfg(debug_assertions)]
            log::debug!("Config parsed successfully: {:?}", config);
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => {
            log::warn!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

/// Always ~/.config/jsonq/config.toml, on every platform
pub fn get_config_path() -> Option<PathBuf> {
    crate::storage::config_dir().map(|dir| dir.join(CONFIG_FILE))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
