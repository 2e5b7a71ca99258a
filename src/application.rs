//! Persistent configuration for the nbk CLI.
//!
//! The configuration only holds the default backup limit used when `nbk backup`
//! runs without `--limit`. It is stored as TOML in the platform config directory.

use crate::constants::{CONFIG_NAME, CONFIG_VERSION, DEFAULT_LIMIT, PKG_NAME};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

/// Errors raised while locating, reading or writing the configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("couldn't find the configuration directory")]
    NoConfigDir,
    #[error("error reading config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("error parsing config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("error writing config file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("error serializing config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The application configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct Application {
    /// Configuration file version.
    pub version: String,
    /// Default maximum number of numbered backups per file. 0 or less disables backups.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for Application {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Application {
    /// Loads the configuration file, or returns the defaults if there is none.
    pub(crate) fn load_config() -> Result<Self, ConfigError> {
        read_config(&config_file()?)
    }

    /// Writes the configuration to the config file.
    pub(crate) fn write(&self) -> Result<(), ConfigError> {
        write_config(self, &config_file()?)
    }
}

/// Returns the absolute path to the configuration file.
pub(crate) fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(CONFIG_NAME))
}

/// Returns the configuration directory for the application, platform-specific.
#[cfg(not(target_os = "macos"))]
fn config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir.join(PKG_NAME))
}

/// Returns the configuration directory for the application, platform-specific.
#[cfg(target_os = "macos")]
fn config_dir() -> Result<PathBuf, ConfigError> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(home_dir.join(".config").join(PKG_NAME))
}

fn read_config(file_path: &Path) -> Result<Application, ConfigError> {
    if !file_path.exists() {
        return Ok(Application::default());
    }
    let toml_str = fs::read_to_string(file_path).map_err(|source| ConfigError::Read {
        path: file_path.to_path_buf(),
        source,
    })?;
    toml::from_str(&toml_str).map_err(|source| ConfigError::Parse {
        path: file_path.to_path_buf(),
        source,
    })
}

/// Writes the configuration in TOML format, creating the parent directory if needed.
fn write_config(data: &Application, file_path: &Path) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(data)?;
    let write = || -> io::Result<()> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(file_path)?;
        let mut writer = io::BufWriter::new(file);
        writer.write_all(toml_str.as_bytes())?;
        writer.flush()
    };
    write().map_err(|source| ConfigError::Write {
        path: file_path.to_path_buf(),
        source,
    })
}
