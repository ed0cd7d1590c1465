//! In-memory [`FileSystem`].
//!
//! Used by hosts without persistent storage and by tests.  Besides plain
//! storage it can:
//!
//! - refuse write-opens for chosen paths ([`deny_writes`](MemoryFileSystem::deny_writes)),
//!   simulating a read-only or full flash partition;
//! - count write-opens per path ([`write_count`](MemoryFileSystem::write_count)),
//!   so tests can assert exactly how many saves happened.
//!
//! Clones share the same underlying storage.

use std::collections::{HashMap, HashSet};
use std::io::{self, Cursor, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::{FileSystem, ReadFile};

#[derive(Debug, Default)]
struct MemoryState {
    files: HashMap<String, Vec<u8>>,
    read_only: HashSet<String>,
    write_opens: HashMap<String, usize>,
}

/// A file system held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces a file without counting it as a write.
    pub fn insert(&self, path: &str, contents: impl Into<Vec<u8>>) {
        self.state
            .lock()
            .files
            .insert(path.to_string(), contents.into());
    }

    /// Deletes a file.  Returns `false` if it did not exist.
    pub fn remove(&self, path: &str) -> bool {
        self.state.lock().files.remove(path).is_some()
    }

    /// Returns a copy of a file's contents.
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.state.lock().files.get(path).cloned()
    }

    pub fn exists(&self, path: &str) -> bool {
        self.state.lock().files.contains_key(path)
    }

    /// Makes every subsequent write-open of `path` fail with
    /// [`io::ErrorKind::PermissionDenied`].
    pub fn deny_writes(&self, path: &str) {
        self.state.lock().read_only.insert(path.to_string());
    }

    /// Undoes [`deny_writes`](Self::deny_writes).
    pub fn allow_writes(&self, path: &str) {
        self.state.lock().read_only.remove(path);
    }

    /// Returns how many times `path` has been successfully opened for writing.
    pub fn write_count(&self, path: &str) -> usize {
        self.state
            .lock()
            .write_opens
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

struct MemoryReadFile {
    cursor: Cursor<Vec<u8>>,
}

impl Read for MemoryReadFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl ReadFile for MemoryReadFile {
    fn size(&self) -> io::Result<u64> {
        Ok(self.cursor.get_ref().len() as u64)
    }
}

/// Write handle appending straight into the shared file map.
struct MemoryWriteFile {
    path: String,
    state: Arc<Mutex<MemoryState>>,
}

impl Write for MemoryWriteFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state
            .lock()
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FileSystem for MemoryFileSystem {
    fn open_read(&self, path: &str) -> io::Result<Box<dyn ReadFile>> {
        let contents = self.contents(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}"))
        })?;
        Ok(Box::new(MemoryReadFile {
            cursor: Cursor::new(contents),
        }))
    }

    fn open_write(&self, path: &str) -> io::Result<Box<dyn Write + Send>> {
        let mut state = self.state.lock();
        if state.read_only.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("file is read-only: {path}"),
            ));
        }

        // Truncate-and-create, as a flash file system does on "w".
        state.files.insert(path.to_string(), Vec::new());
        *state.write_opens.entry(path.to_string()).or_insert(0) += 1;

        Ok(Box::new(MemoryWriteFile {
            path: path.to_string(),
            state: Arc::clone(&self.state),
        }))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
