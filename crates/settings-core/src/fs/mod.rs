//! File store contract consumed by the persistence controller.
//!
//! The controller needs very little from a file system: open a file for
//! reading and learn its size, or open a file for writing (truncating and
//! creating it).  Closing is dropping the handle.
//!
//! Paths are `/`-separated strings as used by embedded flash file systems
//! (e.g. `"/config/mqttSettings.json"`), not host `Path`s.
//!
//! # Testability
//!
//! [`memory::MemoryFileSystem`] keeps files in memory and can refuse writes to
//! chosen paths, so every failure mode of the controller can be exercised
//! without touching the disk.  [`disk::DiskFileSystem`] maps the same paths
//! into a directory on the host.

use std::io::{self, Read, Write};

pub mod disk;
pub mod memory;

/// A file opened for reading.
pub trait ReadFile: Read + Send {
    /// Returns the file's length in bytes.
    fn size(&self) -> io::Result<u64>;
}

/// Minimal byte-stream file system.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Opens an existing file for reading.
    ///
    /// Fails with [`io::ErrorKind::NotFound`] if the file does not exist.
    fn open_read(&self, path: &str) -> io::Result<Box<dyn ReadFile>>;

    /// Opens a file for writing, creating it if needed and discarding any
    /// previous contents.
    fn open_write(&self, path: &str) -> io::Result<Box<dyn Write + Send>>;
}
