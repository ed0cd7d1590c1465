//! # settings-core
//!
//! Settings persistence for resource-constrained devices: keeps an in-memory
//! settings object synchronized with a single JSON file on a small file system.
//!
//! The crate has zero dependencies on a particular settings schema, storage
//! driver, or transport.  Those are injected through traits.
//!
//! # Architecture overview (for beginners)
//!
//! Three concerns are kept apart:
//!
//! - **Who owns the settings?**  A [`SettingsService`] holds the live value
//!   and tells subscribers when it changes.
//!
//! - **What do the settings look like on disk?**  A codec pair
//!   ([`SettingsSerializer`] / [`SettingsDeserializer`]) converts the value to
//!   and from the root object of a [`BoundedDocument`].
//!
//! - **When is the file read or written?**  [`SettingsPersistence`] loads the
//!   file on boot (falling back to defaults when it is missing or corrupt) and
//!   writes it back every time the service reports a change.
//!
//! ```text
//! boot:    file ──► BoundedDocument ──► deserializer ──► SettingsService
//! runtime: SettingsService::update ──► handler ──► serializer ──► file
//! ```
//!
//! - **`domain`** – the bounded document and the codec traits.
//! - **`service`** – the settings store contract and an in-memory store.
//! - **`fs`** – the file store contract, a disk adapter, and an in-memory one.
//! - **`persistence`** – the controller tying the three together.

pub mod domain;
pub mod fs;
pub mod persistence;
pub mod service;

// Re-export the most-used types at the crate root so callers can write
// `settings_core::SettingsPersistence` instead of the full module path.
pub use domain::codec::{JsonCodec, SettingsDeserializer, SettingsSerializer};
pub use domain::document::{BoundedDocument, DocumentError, JsonObject, MAX_FILE_SIZE};
pub use fs::{disk::DiskFileSystem, memory::MemoryFileSystem, FileSystem, ReadFile};
pub use persistence::{
    DefaultsStrategy, EmptyDocumentDefaults, PersistenceConfig, PersistenceError,
    SettingsPersistence,
};
pub use service::{
    memory::InMemorySettingsService, SettingsService, UpdateHandler, UpdateHandlerId,
};
