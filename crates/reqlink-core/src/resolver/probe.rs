//! Filesystem seam and the file-existence prober.
//!
//! The resolver needs two things from its environment: whether a path is an
//! existing regular file, and the text of a manifest. The cache additionally
//! stamps resolved files. All of it goes through [`FileSystem`] so tests and
//! hosts can substitute their own view.

use super::trace::{steps, ResolveTrace, ResolveTraceStep, TraceWarning};
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

/// The filesystem operations resolution depends on.
pub trait FileSystem: Send + Sync {
    /// Whether `path` names an existing regular file (not a directory).
    fn is_file(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Modification time and size of a file, `None` if it is gone.
    fn metadata(&self, path: &Path) -> Option<FileMeta>;
}

/// What the cache needs to know to tell whether a file changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    /// Milliseconds since the Unix epoch, when the platform reports it.
    pub mtime_ms: Option<u64>,
    pub size: u64,
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn metadata(&self, path: &Path) -> Option<FileMeta> {
        let meta = path.metadata().ok()?;
        let mtime_ms = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as u64);
        Some(FileMeta {
            mtime_ms,
            size: meta.len(),
        })
    }
}

/// Join `path` and an optional `sub` segment and return the result if it is a file.
///
/// A missing file is the common case and yields `None`, never an error.
pub fn return_if_file(fs: &dyn FileSystem, path: &Path, sub: Option<&str>) -> Option<PathBuf> {
    let candidate = match sub {
        Some(sub) => path.join(sub),
        None => path.to_path_buf(),
    };
    fs.is_file(&candidate).then_some(candidate)
}

/// One resolution's view of the filesystem.
///
/// Wraps a [`FileSystem`] and, when tracing, records every probed path and
/// the stages the resolver walks through.
pub struct Probe<'a> {
    fs: &'a dyn FileSystem,
    trace: Option<&'a mut ResolveTrace>,
}

impl<'a> Probe<'a> {
    /// Probe without recording a trace.
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs, trace: None }
    }

    /// Probe and record steps into `trace`.
    pub fn traced(fs: &'a dyn FileSystem, trace: &'a mut ResolveTrace) -> Self {
        Self {
            fs,
            trace: Some(trace),
        }
    }

    /// [`return_if_file`] through this probe.
    pub fn file(&mut self, path: &Path, sub: Option<&str>) -> Option<PathBuf> {
        let found = return_if_file(self.fs, path, sub);

        if let Some(trace) = self.trace.as_deref_mut() {
            let tried = match sub {
                Some(sub) => path.join(sub),
                None => path.to_path_buf(),
            };
            trace.add_tried(tried);
        }

        found
    }

    /// Read a file through the underlying filesystem.
    pub fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.fs.read_to_string(path)
    }

    /// Record a stage in the trace and emit it as a tracing event.
    pub(crate) fn step(
        &mut self,
        step: &'static str,
        ok: bool,
        detail: impl Into<String>,
        path: Option<&Path>,
    ) {
        let detail = detail.into();
        trace!(step, ok, path = ?path, "{detail}");

        if let Some(trace) = self.trace.as_deref_mut() {
            let mut entry = ResolveTraceStep::new(step, ok, detail);
            if let Some(path) = path {
                entry = entry.with_path(path);
            }
            trace.add_step(entry);
        }
    }

    pub(crate) fn warn(&mut self, warning: TraceWarning) {
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.add_warning(warning);
        }
    }

    pub(crate) fn found(&mut self, path: &Path) {
        self.step(steps::FINAL_PATH, true, "Resolution complete", Some(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_return_if_file_existing() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "").unwrap();

        assert_eq!(return_if_file(&OsFileSystem, &file, None), Some(file));
    }

    #[test]
    fn test_return_if_file_joins_sub() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let found = return_if_file(&OsFileSystem, dir.path(), Some("package.json"));
        assert_eq!(found, Some(dir.path().join("package.json")));
    }

    #[test]
    fn test_return_if_file_rejects_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();

        assert_eq!(return_if_file(&OsFileSystem, dir.path(), Some("lib")), None);
        assert_eq!(return_if_file(&OsFileSystem, dir.path(), None), None);
    }

    #[test]
    fn test_return_if_file_missing() {
        let dir = tempdir().unwrap();
        assert_eq!(
            return_if_file(&OsFileSystem, &dir.path().join("nope.js"), None),
            None
        );
    }

    #[test]
    fn test_os_metadata() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "abc").unwrap();

        let meta = OsFileSystem.metadata(&file).unwrap();
        assert_eq!(meta.size, 3);
        assert!(meta.mtime_ms.is_some());
        assert_eq!(OsFileSystem.metadata(&dir.path().join("gone.js")), None);
    }

    #[test]
    fn test_traced_probe_records_tried_paths() {
        let dir = tempdir().unwrap();
        let mut trace = ResolveTrace::new();
        {
            let mut probe = Probe::traced(&OsFileSystem, &mut trace);
            probe.file(dir.path(), Some("index.js"));
            probe.file(&dir.path().join("x.js"), None);
        }
        assert_eq!(
            trace.tried,
            vec![dir.path().join("index.js"), dir.path().join("x.js")]
        );
    }
}
