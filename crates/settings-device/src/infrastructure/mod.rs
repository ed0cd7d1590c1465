//! Infrastructure layer for the demo device.
//!
//! Contains OS-facing adapters.  The settings files themselves are reached
//! through `settings_core::DiskFileSystem`; this layer only owns the host
//! configuration that says where that file system is rooted.
//!
//! **Dependency rule**: this layer may depend on `domain` and `settings_core`,
//! but MUST NOT be imported by the `domain` layer.

pub mod storage;
