//! File I/O boundary: the only side effects the engine performs.

use crate::error::{CodemodError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Read and write whole files
///
/// `read` reports a missing file as [`CodemodError::NotFound`]; every other
/// failure is [`CodemodError::Io`].
pub trait FileStore: Send + Sync {
    fn read(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Files on disk, optionally resolved against a root directory
#[derive(Debug, Clone, Default)]
pub struct DiskStore {
    root: Option<PathBuf>,
}

impl DiskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl FileStore for DiskStore {
    fn read(&self, path: &Path) -> Result<String> {
        let full = self.resolve(path);
        fs::read_to_string(&full).map_err(|e| CodemodError::from_io(&full, e))
    }

    /// Write via a sibling temp file and rename, so readers never see a partial file
    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let full = self.resolve(path);
        let file_name = full
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp = full.with_file_name(format!(".{}.langstrip.tmp", file_name));

        fs::write(&temp, content).map_err(|e| CodemodError::Io {
            path: temp.clone(),
            source: e,
        })?;
        fs::rename(&temp, &full).map_err(|e| {
            let _ = fs::remove_file(&temp);
            CodemodError::Io {
                path: full.clone(),
                source: e,
            }
        })
    }
}

/// In-memory files for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<BTreeMap<PathBuf, String>>,
    failing_writes: Mutex<BTreeSet<PathBuf>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Make every write to `path` fail with a permission error
    pub fn with_failing_write(self, path: impl Into<PathBuf>) -> Self {
        self.failing_writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into());
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into(), content.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path.as_ref())
            .cloned()
    }
}

impl FileStore for MemoryStore {
    fn read(&self, path: &Path) -> Result<String> {
        self.get(path)
            .ok_or_else(|| CodemodError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let failing = self
            .failing_writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(path);
        if failing {
            return Err(CodemodError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "write refused"),
            });
        }

        self.insert(path, content);
        Ok(())
    }
}
