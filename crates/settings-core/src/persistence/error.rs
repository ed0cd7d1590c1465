//! Error type for settings file operations.

use thiserror::Error;

use crate::domain::document::DocumentError;

/// Error returned by [`SettingsPersistence::write_to_fs`](super::SettingsPersistence::write_to_fs)
/// and logged (then absorbed) by loading.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The settings file could not be opened for reading (usually: missing).
    #[error("could not open {path} for reading: {source}")]
    OpenForRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings file could not be opened for writing.
    #[error("could not open {path} for writing: {source}")]
    OpenForWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the file's size or contents failed.
    #[error("I/O error reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing or flushing the encoded document failed part-way.
    ///
    /// The file's contents are unspecified afterwards; the next load will most
    /// likely fall back to defaults.
    #[error("I/O error writing {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is oversized, malformed, or not an object.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl PersistenceError {
    /// Returns `true` if the error means the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PersistenceError::OpenForRead { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
