//! File system seam so builds can run against memory in tests.

use rustc_hash::FxHashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait FileSystem: Send + Sync {
    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Write `contents` to `path`, creating missing parent directories.
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// Disk-backed file system
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory file system for testing
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: Mutex<FxHashMap<PathBuf, String>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), contents.into());
    }

    pub fn get_file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl FileSystem for MockFileSystem {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.get_file(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.add_file(path, contents);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}
