//! [`FileSystem`] backed by a directory on the host.
//!
//! Device paths are resolved relative to a root directory, so
//! `"/config/lightState.json"` under root `/var/lib/device` becomes
//! `/var/lib/device/config/lightState.json`.  Parent directories are created
//! on write-open.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};

use super::{FileSystem, ReadFile};

/// A file system rooted at a host directory.
#[derive(Debug, Clone)]
pub struct DiskFileSystem {
    root: PathBuf,
}

impl DiskFileSystem {
    /// Creates a file system rooted at `root`.  The directory need not exist
    /// yet; it is created by the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a device path onto the host.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] for paths that would escape the
    /// root (`..` components) or that name no file.
    pub fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let mut resolved = self.root.clone();
        let mut has_file = false;
        for component in Path::new(path).components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    has_file = true;
                }
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("path escapes file system root: {path}"),
                    ));
                }
            }
        }

        if !has_file {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path names no file: {path:?}"),
            ));
        }
        Ok(resolved)
    }
}

struct DiskReadFile {
    file: File,
}

impl Read for DiskReadFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl ReadFile for DiskReadFile {
    fn size(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }
}

impl FileSystem for DiskFileSystem {
    fn open_read(&self, path: &str) -> io::Result<Box<dyn ReadFile>> {
        let file = File::open(self.resolve(path)?)?;
        Ok(Box::new(DiskReadFile { file }))
    }

    fn open_write(&self, path: &str) -> io::Result<Box<dyn Write + Send>> {
        let resolved = self.resolve(path)?;
        if let Some(dir) = resolved.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = File::create(resolved)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("settings_core_disk_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_resolve_strips_leading_slash() {
        let fs = DiskFileSystem::new("/data");
        let resolved = fs.resolve("/config/light.json").expect("resolve");
        assert_eq!(resolved, PathBuf::from("/data/config/light.json"));
    }

    #[test]
    fn test_resolve_rejects_parent_components() {
        let fs = DiskFileSystem::new("/data");
        let err = fs.resolve("/config/../../etc/passwd").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_resolve_rejects_root_only_path() {
        let fs = DiskFileSystem::new("/data");
        assert!(fs.resolve("/").is_err());
    }

    #[test]
    fn test_open_read_missing_file_is_not_found() {
        let fs = DiskFileSystem::new(temp_root());
        let err = fs.open_read("/config/absent.json").err().expect("must fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_write_creates_parent_dirs_and_read_returns_contents() {
        // Arrange
        let root = temp_root();
        let fs = DiskFileSystem::new(&root);

        // Act
        {
            let mut file = fs.open_write("/config/light.json").expect("open write");
            file.write_all(br#"{"led_on":true}"#).expect("write");
            file.flush().expect("flush");
        }
        let mut file = fs.open_read("/config/light.json").expect("open read");
        let size = file.size().expect("size");
        let mut contents = String::new();
        file.read_to_string(&mut contents).expect("read");

        // Assert
        assert_eq!(size, 15);
        assert_eq!(contents, r#"{"led_on":true}"#);

        // Cleanup
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_open_write_truncates_previous_contents() {
        let root = temp_root();
        let fs = DiskFileSystem::new(&root);

        for payload in [&b"a much longer first payload"[..], &b"{}"[..]] {
            let mut file = fs.open_write("/s.json").expect("open write");
            file.write_all(payload).expect("write");
            file.flush().expect("flush");
        }

        let written = std::fs::read(root.join("s.json")).expect("read back");
        assert_eq!(written, b"{}");

        std::fs::remove_dir_all(&root).ok();
    }
}
