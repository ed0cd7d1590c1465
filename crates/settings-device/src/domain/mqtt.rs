//! MQTT broker connection settings and the status snapshot derived from them.
//!
//! # Serde default values
//!
//! The struct carries `#[serde(default)]`, so any member absent from the
//! settings file takes its value from `MqttSettings::default()`.  An empty
//! document therefore deserializes to the full set of defaults, which is
//! exactly what the persistence controller needs to recover from a missing
//! or corrupt file.

use serde::{Deserialize, Serialize};

/// Default device path of the MQTT settings file.
pub const MQTT_SETTINGS_FILE: &str = "/config/mqttSettings.json";

pub const DEFAULT_MQTT_HOST: &str = "test.mosquitto.org";
pub const DEFAULT_MQTT_PORT: u16 = 1883;
pub const DEFAULT_CLIENT_ID: &str = "esp-device";
pub const DEFAULT_KEEP_ALIVE_SECS: u16 = 16;
pub const DEFAULT_MAX_TOPIC_LENGTH: u16 = 128;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttSettings {
    /// Whether the device should connect to the broker at all.
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    /// Empty means anonymous.
    pub username: String,
    pub password: String,
    pub client_id: String,
    /// Keep-alive interval in seconds.
    pub keep_alive: u16,
    pub clean_session: bool,
    /// Longest topic name the device will build.
    pub max_topic_length: u16,
}

impl Default for MqttSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: DEFAULT_MQTT_HOST.to_string(),
            port: DEFAULT_MQTT_PORT,
            username: String::new(),
            password: String::new(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            keep_alive: DEFAULT_KEEP_ALIVE_SECS,
            clean_session: true,
            max_topic_length: DEFAULT_MAX_TOPIC_LENGTH,
        }
    }
}

/// What a status report says about the MQTT connection.
///
/// The demo device has no network stack, so `connected` is always `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MqttStatus {
    pub enabled: bool,
    pub connected: bool,
    pub client_id: String,
}

impl MqttSettings {
    /// Returns the status snapshot for these settings.
    pub fn status(&self) -> MqttStatus {
        MqttStatus {
            enabled: self.enabled,
            connected: false,
            client_id: self.client_id.clone(),
        }
    }

    /// Returns `true` if credentials are configured.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
