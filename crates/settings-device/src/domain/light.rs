//! Light state: whether the on-board LED is lit.

use serde::Serialize;
use serde_json::Value;
use settings_core::{JsonObject, SettingsDeserializer, SettingsSerializer};

/// LED state applied when the file is missing or the member is unusable.
pub const DEFAULT_LED_STATE: bool = false;

/// Default device path of the light settings file.
pub const LIGHT_SETTINGS_FILE: &str = "/config/lightState.json";

const LED_ON: &str = "led_on";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LightSettings {
    pub led_on: bool,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            led_on: DEFAULT_LED_STATE,
        }
    }
}

/// Field-wise codec for [`LightSettings`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LightSettingsCodec;

impl SettingsSerializer<LightSettings> for LightSettingsCodec {
    fn serialize(&self, settings: &LightSettings, root: &mut JsonObject) {
        root.insert(LED_ON.to_string(), Value::Bool(settings.led_on));
    }
}

impl SettingsDeserializer<LightSettings> for LightSettingsCodec {
    fn deserialize(&self, settings: &mut LightSettings, root: &JsonObject) {
        settings.led_on = root
            .get(LED_ON)
            .and_then(Value::as_bool)
            .unwrap_or(DEFAULT_LED_STATE);
    }
}
