//! [`SettingsPersistence`]: loads a settings file on boot and saves it on change.
//!
//! # Ownership
//!
//! The controller shares its collaborators (codec pair, settings service,
//! file system) through `Arc`s and owns none of them exclusively.  The
//! update handler it registers with the service captures only a `Weak`
//! reference to the controller's state, so the service never keeps a
//! dropped controller alive and no reference cycle forms.  Dropping the
//! controller unsubscribes it.
//!
//! # Threading
//!
//! Every operation runs to completion on the calling thread.  The automatic
//! save triggered by an update runs on the thread that called
//! [`SettingsService::update`], which therefore blocks for the duration of a
//! file write.

use std::io::{Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::codec::{SettingsDeserializer, SettingsSerializer};
use crate::domain::document::{BoundedDocument, DocumentError};
use crate::fs::FileSystem;
use crate::service::{SettingsService, UpdateHandlerId};

use super::config::PersistenceConfig;
use super::defaults::{DefaultsStrategy, EmptyDocumentDefaults};
use super::error::PersistenceError;

/// State shared between the controller and its update handler.
struct Shared<T> {
    serializer: Arc<dyn SettingsSerializer<T>>,
    deserializer: Arc<dyn SettingsDeserializer<T>>,
    service: Arc<dyn SettingsService<T>>,
    fs: Arc<dyn FileSystem>,
    config: PersistenceConfig,
}

impl<T> Shared<T> {
    fn path(&self) -> &str {
        &self.config.file_path
    }

    fn write_to_fs(&self) -> Result<(), PersistenceError> {
        let mut document = BoundedDocument::with_capacity(self.config.max_file_size);
        self.service.read(&mut |settings| {
            self.serializer.serialize(settings, document.root_mut());
        });

        // Encode before opening so an oversized document leaves the old file intact.
        let bytes = document.to_bytes()?;

        let mut file = self
            .fs
            .open_write(self.path())
            .map_err(|source| PersistenceError::OpenForWrite {
                path: self.config.file_path.clone(),
                source,
            })?;
        file.write_all(&bytes)
            .and_then(|()| file.flush())
            .map_err(|source| PersistenceError::Write {
                path: self.config.file_path.clone(),
                source,
            })?;

        debug!(path = self.path(), bytes = bytes.len(), "settings written");
        Ok(())
    }

    fn load_document(&self) -> Result<BoundedDocument, PersistenceError> {
        let capacity = self.config.max_file_size;
        let read_error = |source| PersistenceError::Read {
            path: self.config.file_path.clone(),
            source,
        };

        let mut file =
            self.fs
                .open_read(self.path())
                .map_err(|source| PersistenceError::OpenForRead {
                    path: self.config.file_path.clone(),
                    source,
                })?;

        let size = file.size().map_err(read_error)?;
        if size > capacity as u64 {
            return Err(DocumentError::TooLarge {
                size: usize::try_from(size).unwrap_or(usize::MAX),
                capacity,
            }
            .into());
        }

        // The size check above is authoritative; the cap guards against a
        // file that grows between `size()` and the read.
        let mut bytes = Vec::with_capacity(size as usize);
        file.by_ref()
            .take(capacity as u64 + 1)
            .read_to_end(&mut bytes)
            .map_err(read_error)?;

        Ok(BoundedDocument::from_slice(&bytes, capacity)?)
    }
}

/// Synchronizes one [`SettingsService`] with one file.
///
/// Construction subscribes to the service (automatic saving enabled).  Call
/// [`read_from_fs`](Self::read_from_fs) once at boot to load the file.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use serde::{Deserialize, Serialize};
/// use settings_core::{
///     InMemorySettingsService, JsonCodec, MemoryFileSystem, SettingsPersistence, SettingsService,
/// };
///
/// #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// #[serde(default)]
/// struct Light {
///     led_on: bool,
/// }
///
/// let service = Arc::new(InMemorySettingsService::new(Light::default()));
/// let fs = MemoryFileSystem::new();
/// let codec = Arc::new(JsonCodec::<Light>::new());
/// let persistence = SettingsPersistence::<Light>::new(
///     codec.clone(),
///     codec,
///     service.clone(),
///     Arc::new(fs.clone()),
///     "/config/lightState.json",
/// );
///
/// persistence.read_from_fs(); // no file yet: defaults
/// service.update("demo", &mut |light| light.led_on = true);
///
/// assert_eq!(fs.contents("/config/lightState.json").unwrap(), br#"{"led_on":true}"#);
/// ```
pub struct SettingsPersistence<T: 'static> {
    shared: Arc<Shared<T>>,
    defaults: Box<dyn DefaultsStrategy<T>>,
    update_handler_id: Mutex<Option<UpdateHandlerId>>,
}

impl<T: 'static> SettingsPersistence<T> {
    /// Creates a controller for `file_path` with capacity
    /// [`MAX_FILE_SIZE`](crate::MAX_FILE_SIZE) and enables automatic saving.
    pub fn new(
        serializer: Arc<dyn SettingsSerializer<T>>,
        deserializer: Arc<dyn SettingsDeserializer<T>>,
        service: Arc<dyn SettingsService<T>>,
        fs: Arc<dyn FileSystem>,
        file_path: impl Into<String>,
    ) -> Self {
        Self::from_config(
            serializer,
            deserializer,
            service,
            fs,
            PersistenceConfig::new(file_path),
        )
    }

    /// Creates a controller from an explicit [`PersistenceConfig`] and enables
    /// automatic saving.
    pub fn from_config(
        serializer: Arc<dyn SettingsSerializer<T>>,
        deserializer: Arc<dyn SettingsDeserializer<T>>,
        service: Arc<dyn SettingsService<T>>,
        fs: Arc<dyn FileSystem>,
        config: PersistenceConfig,
    ) -> Self {
        let persistence = Self {
            shared: Arc::new(Shared {
                serializer,
                deserializer,
                service,
                fs,
                config,
            }),
            defaults: Box::new(EmptyDocumentDefaults),
            update_handler_id: Mutex::new(None),
        };
        persistence.enable_automatic();
        persistence
    }

    /// Replaces the policy applied when loading fails.
    pub fn with_defaults(mut self, defaults: impl DefaultsStrategy<T> + 'static) -> Self {
        self.defaults = Box::new(defaults);
        self
    }

    /// Returns the settings file's device path.
    pub fn file_path(&self) -> &str {
        self.shared.path()
    }

    /// Returns the controller's configuration.
    pub fn config(&self) -> &PersistenceConfig {
        &self.shared.config
    }

    /// Loads the settings file into the service, or applies defaults.
    ///
    /// Defaults are applied when the file is missing, larger than the
    /// capacity, not valid JSON, or not a JSON object.  Update handlers are
    /// not invoked either way, so loading never triggers a save.
    pub fn read_from_fs(&self) {
        match self.shared.load_document() {
            Ok(document) => {
                let deserializer = &self.shared.deserializer;
                self.shared.service.update_without_propagation(&mut |settings| {
                    deserializer.deserialize(settings, document.root());
                });
                info!(path = self.file_path(), "settings loaded");
            }
            Err(e) => {
                if e.is_not_found() {
                    info!(path = self.file_path(), "no settings file");
                } else {
                    warn!(path = self.file_path(), error = %e, "settings file unusable");
                }
                self.read_defaults();
                info!(path = self.file_path(), "default settings applied");
            }
        }
    }

    /// Serializes the current settings and replaces the file's contents.
    ///
    /// # Errors
    ///
    /// - [`PersistenceError::Document`] if the encoded settings exceed the
    ///   capacity; the file is not opened.
    /// - [`PersistenceError::OpenForWrite`] if the file cannot be opened; its
    ///   previous contents are untouched.
    /// - [`PersistenceError::Write`] if writing fails part-way; the file's
    ///   contents are then unspecified.
    pub fn write_to_fs(&self) -> Result<(), PersistenceError> {
        self.shared.write_to_fs()
    }

    /// Subscribes to the service so every propagated update saves the file.
    /// Does nothing if already subscribed.
    pub fn enable_automatic(&self) {
        let mut handler_id = self.update_handler_id.lock();
        if handler_id.is_some() {
            return;
        }

        let shared = Arc::downgrade(&self.shared);
        let id = self
            .shared
            .service
            .add_update_handler(Arc::new(move |origin_id: &str| {
                let Some(shared) = shared.upgrade() else {
                    return;
                };
                if let Err(e) = shared.write_to_fs() {
                    warn!(path = shared.path(), origin_id, error = %e, "automatic save failed");
                }
            }));
        *handler_id = Some(id);
        debug!(path = self.file_path(), handler = %id, "automatic saving enabled");
    }

    /// Unsubscribes from the service.  Does nothing if not subscribed.
    pub fn disable_automatic(&self) {
        if let Some(id) = self.update_handler_id.lock().take() {
            self.shared.service.remove_update_handler(id);
            debug!(path = self.file_path(), handler = %id, "automatic saving disabled");
        }
    }

    /// Returns `true` while subscribed to the service.
    pub fn is_automatic_enabled(&self) -> bool {
        self.update_handler_id.lock().is_some()
    }

    fn read_defaults(&self) {
        let deserializer = self.shared.deserializer.as_ref();
        let defaults = self.defaults.as_ref();
        self.shared.service.update_without_propagation(&mut |settings| {
            defaults.apply_defaults(settings, deserializer);
        });
    }
}

impl<T: 'static> Drop for SettingsPersistence<T> {
    fn drop(&mut self) {
        self.disable_automatic();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
