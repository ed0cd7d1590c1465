//! TOML-based host configuration for the demo device.
//!
//! Example:
//!
//! ```toml
//! [storage]
//! data_dir = "/var/lib/settings-device"
//! light_settings_path = "/config/lightState.json"
//! mqtt_settings_path = "/config/mqttSettings.json"
//! max_file_size = 1024
//!
//! [logging]
//! log_level = "debug"
//! ```
//!
//! Every field has a serde default, so an empty file (or no file at all) is a
//! valid configuration.  This is the *host* configuration; the device
//! settings themselves live in the JSON files it points at.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use settings_core::{PersistenceConfig, MAX_FILE_SIZE};
use thiserror::Error;

use crate::domain::light::LIGHT_SETTINGS_FILE;
use crate::domain::mqtt::MQTT_SETTINGS_FILE;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the settings files live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Host directory the device file system is rooted at.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Device path of the light settings file.
    #[serde(default = "default_light_settings_path")]
    pub light_settings_path: String,
    /// Device path of the MQTT settings file.
    #[serde(default = "default_mqtt_settings_path")]
    pub mqtt_settings_path: String,
    /// Capacity of each settings document in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_light_settings_path() -> String {
    LIGHT_SETTINGS_FILE.to_string()
}
fn default_mqtt_settings_path() -> String {
    MQTT_SETTINGS_FILE.to_string()
}
fn default_max_file_size() -> usize {
    MAX_FILE_SIZE
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            light_settings_path: default_light_settings_path(),
            mqtt_settings_path: default_mqtt_settings_path(),
            max_file_size: default_max_file_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl StorageConfig {
    /// Persistence config for the light settings file.
    pub fn light_persistence(&self) -> PersistenceConfig {
        PersistenceConfig::new(self.light_settings_path.clone())
            .with_max_file_size(self.max_file_size)
    }

    /// Persistence config for the MQTT settings file.
    pub fn mqtt_persistence(&self) -> PersistenceConfig {
        PersistenceConfig::new(self.mqtt_settings_path.clone())
            .with_max_file_size(self.max_file_size)
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Loads `DeviceConfig` from `path`, returning `DeviceConfig::default()` if
/// the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<DeviceConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DeviceConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &DeviceConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
