//! Application layer use cases for the demo device.
//!
//! # Sub-modules
//!
//! - **`device`** – owns one settings service and one persistence controller
//!   per settings type, boots them from storage, and exposes the operations
//!   the command line drives (toggle the LED, edit MQTT settings, bulk
//!   import, factory reset).
//!
//! The layer depends on the `FileSystem` abstraction only, so tests run the
//! whole device against `settings_core::MemoryFileSystem`.

pub mod device;
