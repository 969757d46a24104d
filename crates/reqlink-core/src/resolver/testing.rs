//! In-memory filesystem for resolver tests.

use super::probe::{FileMeta, FileSystem};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Files keyed by exact path. Counts every access so tests can assert
/// that a resolution never touched the filesystem.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: HashMap<PathBuf, String>,
    accesses: AtomicUsize,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    pub fn accesses(&self) -> usize {
        self.accesses.load(Ordering::Relaxed)
    }
}

impl FileSystem for MemoryFs {
    fn is_file(&self, path: &Path) -> bool {
        self.accesses.fetch_add(1, Ordering::Relaxed);
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.accesses.fetch_add(1, Ordering::Relaxed);
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn metadata(&self, path: &Path) -> Option<FileMeta> {
        self.accesses.fetch_add(1, Ordering::Relaxed);
        self.files.get(path).map(|content| FileMeta {
            mtime_ms: None,
            size: content.len() as u64,
        })
    }
}
