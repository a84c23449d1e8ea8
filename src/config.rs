//! User configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::docker::RetryPolicy;

const APP_DIR: &str = "vm-docker";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub transport: TransportConfig,

    #[serde(default)]
    pub ssh: SshConfig,

    #[serde(default)]
    pub restart: RestartConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Ssh,
    Local,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default)]
    pub kind: TransportKind,

    /// Shell used by the local transport, `sh` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_file: Option<String>,

    /// Extra `-o` options handed to ssh.
    #[serde(default)]
    pub options: Vec<String>,

    /// Refuse interactive password prompts.
    #[serde(default = "default_true")]
    pub batch_mode: bool,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            user: None,
            port: None,
            identity_file: None,
            options: Vec::new(),
            batch_mode: true,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestartConfig {
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            max_attempts: default_max_attempts(),
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_settle_delay_ms() -> u64 {
    3000
}

fn default_max_attempts() -> u32 {
    5
}

fn default_interval_ms() -> u64 {
    1000
}

impl RestartConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            max_attempts: self.max_attempts,
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

pub fn get_app_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_DIR))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join(CONFIG_FILE))
}

impl Config {
    /// Load the config from the default location, falling back to defaults
    /// when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    save_config_to(config, &path)
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let content = config.to_toml()?;
    fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
