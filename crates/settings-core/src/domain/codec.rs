//! Serializer/deserializer pair mapping a settings type onto a document root.
//!
//! The persistence controller never inspects the settings value itself.  It
//! only hands a reference to one of these traits together with the root
//! object of a [`BoundedDocument`](super::document::BoundedDocument).
//!
//! # Contract
//!
//! - [`SettingsSerializer::serialize`] writes the settings into an initially
//!   empty root object.
//! - [`SettingsDeserializer::deserialize`] reads the settings out of a root
//!   object and **must tolerate an empty root**, populating sensible defaults
//!   for every member that is missing.  The controller relies on this to
//!   recover from a missing or corrupt file.
//!
//! Plain closures implement both traits, so a codec can be written inline:
//!
//! ```rust
//! use serde_json::Value;
//! use settings_core::{JsonObject, SettingsDeserializer, SettingsSerializer};
//!
//! struct Light {
//!     led_on: bool,
//! }
//!
//! let serializer = |light: &Light, root: &mut JsonObject| {
//!     root.insert("led_on".to_string(), Value::Bool(light.led_on));
//! };
//! let deserializer = |light: &mut Light, root: &JsonObject| {
//!     light.led_on = root.get("led_on").and_then(Value::as_bool).unwrap_or(false);
//! };
//!
//! let mut root = JsonObject::new();
//! serializer.serialize(&Light { led_on: true }, &mut root);
//!
//! let mut restored = Light { led_on: false };
//! deserializer.deserialize(&mut restored, &root);
//! assert!(restored.led_on);
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::document::JsonObject;

/// Writes a settings value into a document root object.
pub trait SettingsSerializer<T>: Send + Sync {
    fn serialize(&self, settings: &T, root: &mut JsonObject);
}

/// Reads a settings value out of a document root object.
///
/// Implementations must populate defaults when given an empty root.
pub trait SettingsDeserializer<T>: Send + Sync {
    fn deserialize(&self, settings: &mut T, root: &JsonObject);
}

impl<T, F> SettingsSerializer<T> for F
where
    F: Fn(&T, &mut JsonObject) + Send + Sync,
{
    fn serialize(&self, settings: &T, root: &mut JsonObject) {
        self(settings, root)
    }
}

impl<T, F> SettingsDeserializer<T> for F
where
    F: Fn(&mut T, &JsonObject) + Send + Sync,
{
    fn deserialize(&self, settings: &mut T, root: &JsonObject) {
        self(settings, root)
    }
}

// ── JsonCodec ─────────────────────────────────────────────────────────────────

/// A codec for any serde type, implementing both halves of the pair.
///
/// Serializing writes every member of `T`'s JSON object form into the root.
/// Deserializing parses the root as a `T`; members absent from the root take
/// whatever `#[serde(default)]` supplies, so an empty root yields the
/// defaults.  If the root cannot be parsed as a `T` at all (e.g. a member has
/// the wrong type) the settings are reset to `T::default()`.
///
/// # Examples
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use settings_core::{JsonCodec, JsonObject, SettingsDeserializer};
///
/// #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
/// #[serde(default)]
/// struct Wifi {
///     ssid: String,
///     hostname: String,
/// }
///
/// let codec = JsonCodec::<Wifi>::new();
/// let mut wifi = Wifi { ssid: "home".into(), hostname: "esp".into() };
/// codec.deserialize(&mut wifi, &JsonObject::new());
/// assert_eq!(wifi, Wifi::default());
/// ```
pub struct JsonCodec<T> {
    _settings: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self {
            _settings: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonCodec")
            .field("settings", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Serialize> SettingsSerializer<T> for JsonCodec<T> {
    fn serialize(&self, settings: &T, root: &mut JsonObject) {
        match serde_json::to_value(settings) {
            Ok(Value::Object(members)) => root.extend(members),
            Ok(_) => warn!(
                settings = std::any::type_name::<T>(),
                "settings did not serialize to a JSON object; nothing written"
            ),
            Err(e) => warn!(
                settings = std::any::type_name::<T>(),
                error = %e,
                "failed to serialize settings"
            ),
        }
    }
}

impl<T: DeserializeOwned + Default> SettingsDeserializer<T> for JsonCodec<T> {
    fn deserialize(&self, settings: &mut T, root: &JsonObject) {
        match serde_json::from_value::<T>(Value::Object(root.clone())) {
            Ok(parsed) => *settings = parsed,
            Err(e) => {
                warn!(
                    settings = std::any::type_name::<T>(),
                    error = %e,
                    "settings document does not match schema; using defaults"
                );
                *settings = T::default();
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Ntp {
        enabled: bool,
        server: String,
        tz_label: String,
    }

    impl Default for Ntp {
        fn default() -> Self {
            Self {
                enabled: true,
                server: "time.google.com".to_string(),
                tz_label: "Europe/London".to_string(),
            }
        }
    }

    fn custom() -> Ntp {
        Ntp {
            enabled: false,
            server: "pool.ntp.org".to_string(),
            tz_label: "Asia/Seoul".to_string(),
        }
    }

    #[test]
    fn test_json_codec_serializes_members_into_root() {
        // Arrange
        let codec = JsonCodec::<Ntp>::new();
        let mut root = JsonObject::new();

        // Act
        codec.serialize(&custom(), &mut root);

        // Assert
        assert_eq!(root["enabled"], false);
        assert_eq!(root["server"], "pool.ntp.org");
        assert_eq!(root["tz_label"], "Asia/Seoul");
    }

    #[test]
    fn test_json_codec_round_trips_through_root() {
        let codec = JsonCodec::<Ntp>::new();
        let mut root = JsonObject::new();
        codec.serialize(&custom(), &mut root);

        let mut restored = Ntp::default();
        codec.deserialize(&mut restored, &root);

        assert_eq!(restored, custom());
    }

    #[test]
    fn test_json_codec_empty_root_yields_defaults() {
        // Arrange – start from non-default values
        let codec = JsonCodec::<Ntp>::new();
        let mut settings = custom();

        // Act
        codec.deserialize(&mut settings, &JsonObject::new());

        // Assert
        assert_eq!(settings, Ntp::default());
    }

    #[test]
    fn test_json_codec_partial_root_keeps_defaults_for_missing_members() {
        // Arrange
        let codec = JsonCodec::<Ntp>::new();
        let mut root = JsonObject::new();
        root.insert("server".to_string(), json!("ntp.local"));
        let mut settings = custom();

        // Act
        codec.deserialize(&mut settings, &root);

        // Assert
        assert_eq!(settings.server, "ntp.local");
        assert!(settings.enabled, "missing member must take its default");
        assert_eq!(settings.tz_label, "Europe/London");
    }

    #[test]
    fn test_json_codec_wrong_member_type_resets_to_defaults() {
        let codec = JsonCodec::<Ntp>::new();
        let mut root = JsonObject::new();
        root.insert("enabled".to_string(), json!("yes"));
        let mut settings = custom();

        codec.deserialize(&mut settings, &root);

        assert_eq!(settings, Ntp::default());
    }

    #[test]
    fn test_json_codec_ignores_unknown_members() {
        let codec = JsonCodec::<Ntp>::new();
        let mut root = JsonObject::new();
        root.insert("legacy_field".to_string(), json!(12));
        root.insert("server".to_string(), json!("ntp.local"));
        let mut settings = Ntp::default();

        codec.deserialize(&mut settings, &root);

        assert_eq!(settings.server, "ntp.local");
    }

    #[test]
    fn test_closures_implement_codec_traits() {
        // Arrange
        let serializer = |value: &u16, root: &mut JsonObject| {
            root.insert("port".to_string(), json!(*value));
        };
        let deserializer = |value: &mut u16, root: &JsonObject| {
            *value = root
                .get("port")
                .and_then(Value::as_u64)
                .and_then(|p| u16::try_from(p).ok())
                .unwrap_or(1883);
        };
        let mut root = JsonObject::new();

        // Act
        serializer.serialize(&8883, &mut root);
        let mut port = 0;
        deserializer.deserialize(&mut port, &root);
        let mut default_port = 0;
        deserializer.deserialize(&mut default_port, &JsonObject::new());

        // Assert
        assert_eq!(port, 8883);
        assert_eq!(default_port, 1883);
    }
}
