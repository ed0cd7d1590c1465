//! Keeps a [`SettingsService`](crate::SettingsService) synchronized with a
//! file.
//!
//! # Load / save protocol (for beginners)
//!
//! ```text
//! read_from_fs()                         write_to_fs()
//!   open file ──► too big? ──┐             read settings ──► serializer
//!   parse JSON ─► not {}? ───┤             encode ──► too big? ──► Err
//!   deserializer ◄── root    │             open for write ──► Err
//!                            ▼             write all, flush, close
//!                     apply defaults
//! ```
//!
//! - Loading never fails from the caller's point of view: any problem with
//!   the file ends in the defaults being applied, so boot always leaves a
//!   usable configuration.  Loading does not notify update handlers.
//! - Saving reports failure through a `Result`; there is nothing sensible to
//!   fall back to when a write cannot happen.
//! - While *automatic* saving is enabled the controller is subscribed to the
//!   service and saves after every propagated update.

pub mod config;
pub mod controller;
pub mod defaults;
pub mod error;

pub use config::PersistenceConfig;
pub use controller::SettingsPersistence;
pub use defaults::{DefaultsStrategy, EmptyDocumentDefaults};
pub use error::PersistenceError;
