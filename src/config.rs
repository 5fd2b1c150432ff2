//! Configuration for dataset location and download behavior
//!
//! Values are resolved in priority order:
//! 1. Command-line flags (applied by the CLI)
//! 2. `ATK_DATASET_URL` / `ATK_CACHE_FILE` environment variables
//! 3. `[dataset]` section of `~/.atk/config.toml`
//! 4. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::DEFAULT_CACHE_FILE;
use crate::error::{Error, Result};
use crate::source::DEFAULT_DATASET_URL;

pub const ENV_DATASET_URL: &str = "ATK_DATASET_URL";
pub const ENV_CACHE_FILE: &str = "ATK_CACHE_FILE";

/// Dataset settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Where to download the bundle from when the cache is missing
    #[serde(default = "default_dataset_url")]
    pub dataset_url: String,

    /// Path of the local cache file
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,

    /// Whole-request download timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_dataset_url() -> String {
    DEFAULT_DATASET_URL.to_string()
}

fn default_cache_file() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_FILE)
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_url: default_dataset_url(),
            cache_file: default_cache_file(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    dataset: Option<Config>,
}

impl Config {
    /// Load from `~/.atk/config.toml` and the environment
    pub fn load() -> Result<Self> {
        let config = match user_config_path() {
            Some(path) => Self::from_file(&path)?,
            None => {
                log::debug!("Could not determine home directory, using default config");
                Self::default()
            }
        };

        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Load the `[dataset]` section of a TOML file, falling back to defaults
    /// when the file or the section is missing
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml(&contents)
            .map_err(|e| Error::Configuration(format!("Failed to parse {}: {}", path.display(), e)))
    }

    fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(contents)?;
        Ok(file.dataset.unwrap_or_default())
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_DATASET_URL).filter(|v| !v.is_empty()) {
            log::debug!("Dataset URL overridden by {}", ENV_DATASET_URL);
            self.dataset_url = url;
        }
        if let Some(file) = lookup(ENV_CACHE_FILE).filter(|v| !v.is_empty()) {
            log::debug!("Cache file overridden by {}", ENV_CACHE_FILE);
            self.cache_file = PathBuf::from(file);
        }
        self
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".atk").join("config.toml"))
}
