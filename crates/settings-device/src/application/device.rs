//! Device: the settings services of the demo device and their persistence.
//!
//! ```text
//! Device::new()   -- creates services + controllers (automatic saving on)
//! Device::boot()  -- loads every settings file, falling back to defaults
//! set_led / update_mqtt -- update a service; its controller saves the file
//! import()        -- suspends automatic saving, applies, saves each file once
//! ```

use std::sync::Arc;

use serde_json::Value;
use settings_core::{
    BoundedDocument, DocumentError, FileSystem, InMemorySettingsService, JsonCodec, JsonObject,
    PersistenceError, SettingsDeserializer, SettingsPersistence, SettingsService, MAX_FILE_SIZE,
};
use thiserror::Error;
use tracing::info;

use crate::domain::light::{LightSettings, LightSettingsCodec};
use crate::domain::mqtt::{MqttSettings, MqttStatus};
use crate::infrastructure::storage::config::StorageConfig;

/// Origin id passed to update handlers for changes made by an import.
pub const IMPORT_ORIGIN: &str = "import";

/// Origin id passed to update handlers for changes made by a reset.
pub const RESET_ORIGIN: &str = "reset";

/// Capacity of an import document: one section per settings file.
pub const IMPORT_CAPACITY: usize = 2 * MAX_FILE_SIZE;

/// Errors from device operations that touch storage explicitly.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The import document was oversized, malformed, or not an object.
    #[error("invalid import document: {0}")]
    InvalidImport(#[from] DocumentError),

    /// An import section was present but not a JSON object.
    #[error("import section `{0}` must be an object")]
    InvalidSection(&'static str),

    /// A settings file could not be written.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Which settings files an import touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub light: bool,
    pub mqtt: bool,
}

/// The demo device's settings services and their persistence controllers.
pub struct Device {
    light: Arc<InMemorySettingsService<LightSettings>>,
    mqtt: Arc<InMemorySettingsService<MqttSettings>>,
    light_persistence: SettingsPersistence<LightSettings>,
    mqtt_persistence: SettingsPersistence<MqttSettings>,
}

impl Device {
    /// Creates the services and controllers.  Call [`boot`](Self::boot) next.
    pub fn new(fs: Arc<dyn FileSystem>, storage: &StorageConfig) -> Self {
        let light = Arc::new(InMemorySettingsService::new(LightSettings::default()));
        let light_codec = Arc::new(LightSettingsCodec);
        let light_persistence = SettingsPersistence::<LightSettings>::from_config(
            light_codec.clone(),
            light_codec,
            light.clone(),
            Arc::clone(&fs),
            storage.light_persistence(),
        );

        let mqtt = Arc::new(InMemorySettingsService::new(MqttSettings::default()));
        let mqtt_codec = Arc::new(JsonCodec::<MqttSettings>::new());
        let mqtt_persistence = SettingsPersistence::<MqttSettings>::from_config(
            mqtt_codec.clone(),
            mqtt_codec,
            mqtt.clone(),
            fs,
            storage.mqtt_persistence(),
        );

        Self {
            light,
            mqtt,
            light_persistence,
            mqtt_persistence,
        }
    }

    /// Loads every settings file.  Never fails: unusable files yield defaults.
    pub fn boot(&self) {
        self.light_persistence.read_from_fs();
        self.mqtt_persistence.read_from_fs();
        info!("device settings loaded");
    }

    pub fn light(&self) -> LightSettings {
        self.light.snapshot()
    }

    pub fn mqtt(&self) -> MqttSettings {
        self.mqtt.snapshot()
    }

    pub fn mqtt_status(&self) -> MqttStatus {
        let mut status = None;
        self.mqtt.read(&mut |settings| status = Some(settings.status()));
        status.unwrap_or_else(|| MqttSettings::default().status())
    }

    /// Turns the LED on or off.  Saved automatically.
    pub fn set_led(&self, origin_id: &str, led_on: bool) {
        self.light
            .update(origin_id, &mut |settings| settings.led_on = led_on);
    }

    /// Applies `change` to the MQTT settings.  Saved automatically.
    pub fn update_mqtt(&self, origin_id: &str, mut change: impl FnMut(&mut MqttSettings)) {
        self.mqtt.update(origin_id, &mut |settings| change(settings));
    }

    /// Applies a bulk import of the form `{"light": {...}, "mqtt": {...}}`.
    ///
    /// Both sections are optional; a present section replaces that file's
    /// settings entirely (missing members take their defaults).  Automatic
    /// saving is suspended while the sections are applied, so each touched
    /// file is written exactly once, after everything has been applied.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::InvalidImport`] / [`DeviceError::InvalidSection`]
    ///   before anything is changed.
    /// - [`DeviceError::Persistence`] if a file cannot be written; the
    ///   in-memory settings keep the imported values.
    pub fn import(&self, bytes: &[u8]) -> Result<ImportSummary, DeviceError> {
        let document = BoundedDocument::from_slice(bytes, IMPORT_CAPACITY)?;
        let light = section(document.root(), "light")?;
        let mqtt = section(document.root(), "mqtt")?;

        self.light_persistence.disable_automatic();
        self.mqtt_persistence.disable_automatic();

        if let Some(root) = light {
            self.light.update(IMPORT_ORIGIN, &mut |settings| {
                LightSettingsCodec.deserialize(settings, root);
            });
        }
        if let Some(root) = mqtt {
            let codec = JsonCodec::<MqttSettings>::new();
            self.mqtt.update(IMPORT_ORIGIN, &mut |settings| {
                codec.deserialize(settings, root);
            });
        }

        self.light_persistence.enable_automatic();
        self.mqtt_persistence.enable_automatic();

        if light.is_some() {
            self.light_persistence.write_to_fs()?;
        }
        if mqtt.is_some() {
            self.mqtt_persistence.write_to_fs()?;
        }

        let summary = ImportSummary {
            light: light.is_some(),
            mqtt: mqtt.is_some(),
        };
        info!(light = summary.light, mqtt = summary.mqtt, "settings imported");
        Ok(summary)
    }

    /// Restores every settings type to its defaults.  Saved automatically.
    pub fn reset(&self) {
        let empty = BoundedDocument::new();
        self.light.update(RESET_ORIGIN, &mut |settings| {
            LightSettingsCodec.deserialize(settings, empty.root());
        });
        let codec = JsonCodec::<MqttSettings>::new();
        self.mqtt.update(RESET_ORIGIN, &mut |settings| {
            codec.deserialize(settings, empty.root());
        });
        info!("settings reset to defaults");
    }

    /// Writes every settings file now, regardless of automatic saving.
    ///
    /// # Errors
    ///
    /// Returns the first [`PersistenceError`] encountered.
    pub fn save_all(&self) -> Result<(), PersistenceError> {
        self.light_persistence.write_to_fs()?;
        self.mqtt_persistence.write_to_fs()
    }
}

fn section<'a>(
    root: &'a JsonObject,
    name: &'static str,
) -> Result<Option<&'a JsonObject>, DeviceError> {
    match root.get(name) {
        None => Ok(None),
        Some(Value::Object(section)) => Ok(Some(section)),
        Some(_) => Err(DeviceError::InvalidSection(name)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
