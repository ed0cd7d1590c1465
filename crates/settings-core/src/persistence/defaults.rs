//! What to do when the settings file cannot be loaded.
//!
//! The standard policy, [`EmptyDocumentDefaults`], hands an empty document to
//! the deserializer and relies on its contract to fill in defaults.  Hosts
//! with other needs (a factory-settings partition, defaults pushed from a
//! provisioning server, ...) plug in their own [`DefaultsStrategy`] with
//! [`SettingsPersistence::with_defaults`](super::SettingsPersistence::with_defaults)
//! and keep the rest of the load/save machinery.

use crate::domain::codec::SettingsDeserializer;
use crate::domain::document::BoundedDocument;

/// Populates a settings value after a failed load.
///
/// Closures of the form `Fn(&mut T, &dyn SettingsDeserializer<T>)` implement
/// this trait.
pub trait DefaultsStrategy<T>: Send + Sync {
    fn apply_defaults(&self, settings: &mut T, deserializer: &dyn SettingsDeserializer<T>);
}

/// Deserializes an empty document.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyDocumentDefaults;

impl<T> DefaultsStrategy<T> for EmptyDocumentDefaults {
    fn apply_defaults(&self, settings: &mut T, deserializer: &dyn SettingsDeserializer<T>) {
        let document = BoundedDocument::new();
        deserializer.deserialize(settings, document.root());
    }
}

impl<T, F> DefaultsStrategy<T> for F
where
    F: Fn(&mut T, &dyn SettingsDeserializer<T>) + Send + Sync,
{
    fn apply_defaults(&self, settings: &mut T, deserializer: &dyn SettingsDeserializer<T>) {
        self(settings, deserializer)
    }
}
