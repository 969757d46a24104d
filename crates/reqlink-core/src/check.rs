//! Project-wide specifier check.
//!
//! Walks a directory, scans every source file for specifiers and resolves
//! each one. Anything that does not resolve, and any manifest that breaks
//! resolution, is reported.

use crate::error::{Error, Result};
use crate::imports::{scan_imports, ImportKind};
use crate::resolver::{CachedResolver, FileSystem, MemoryResolverCache, ResolutionContext, Resolved};
use rayon::prelude::*;
use reqlink_util::fs::{has_suffix, read_to_string_lossy};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Directories never descended into.
const SKIP_DIRS: &[&str] = &["node_modules", ".git"];

/// Why a specifier was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// Neither Node resolution nor alias roots found it.
    Unresolved,
    /// A `package.json` on the way was unreadable or malformed.
    ManifestError,
    /// A source file, or a file resolution needed, could not be read.
    ReadError,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckProblem {
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_kind: Option<ImportKind>,
    pub kind: ProblemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub root: PathBuf,
    pub files_scanned: usize,
    pub specifiers: usize,
    pub problems: Vec<CheckProblem>,
}

impl CheckReport {
    #[must_use]
    pub fn ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Source files under `root` whose names end with one of `extensions`,
/// sorted for determinism.
pub fn source_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !SKIP_DIRS.iter().any(|d| e.file_name() == *d)
        })
    {
        let entry = entry.map_err(|e| Error::other(format!("Failed to walk directory: {e}")))?;
        if entry.file_type().is_file() && has_suffix(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Check every source file under `root`.
pub fn check_project(
    fs: &dyn FileSystem,
    ctx: &ResolutionContext,
    root: &Path,
    source_extensions: &[String],
) -> Result<CheckReport> {
    let files = source_files(root, source_extensions)?;
    let cache = MemoryResolverCache::new();
    let resolver = CachedResolver::new(fs, ctx, &cache);

    let per_file: Vec<(usize, Vec<CheckProblem>)> = files
        .par_iter()
        .map(|file| check_file(&resolver, file))
        .collect();

    let specifiers: usize = per_file.iter().map(|(n, _)| n).sum();
    let problems: Vec<CheckProblem> = per_file.into_iter().flat_map(|(_, p)| p).collect();

    debug!(
        root = %root.display(),
        files = files.len(),
        specifiers,
        problems = problems.len(),
        cached = cache.len(),
        "check complete"
    );

    Ok(CheckReport {
        root: root.to_path_buf(),
        files_scanned: files.len(),
        specifiers,
        problems,
    })
}

fn check_file(resolver: &CachedResolver<'_>, file: &Path) -> (usize, Vec<CheckProblem>) {
    let source = match read_to_string_lossy(file) {
        Ok(source) => source,
        Err(e) => {
            return (
                0,
                vec![CheckProblem {
                    file: file.to_path_buf(),
                    line: None,
                    specifier: None,
                    import_kind: None,
                    kind: ProblemKind::ReadError,
                    message: Some(e.to_string()),
                }],
            );
        }
    };

    let from_dir = file.parent().unwrap_or(Path::new("."));
    let specs = scan_imports(&source);
    let mut problems = Vec::new();

    for spec in &specs {
        let (kind, message) = match resolver.find(&spec.raw, from_dir) {
            Ok(Resolved::NotFound) => (ProblemKind::Unresolved, None),
            Ok(_) => continue,
            Err(e) if e.is_manifest() => (ProblemKind::ManifestError, Some(e.to_string())),
            Err(e) => (ProblemKind::ReadError, Some(e.to_string())),
        };
        problems.push(CheckProblem {
            file: file.to_path_buf(),
            line: Some(spec.line),
            specifier: Some(spec.raw.clone()),
            import_kind: Some(spec.kind),
            kind,
            message,
        });
    }

    (specs.len(), problems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SOURCE_EXTENSIONS;
    use crate::resolver::OsFileSystem;
    use std::fs;
    use tempfile::tempdir;

    fn source_exts() -> Vec<String> {
        DEFAULT_SOURCE_EXTENSIONS
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_source_files_skips_node_modules() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("src").join("a.js"), "");
        write(&dir.path().join("src").join("b.ts"), "");
        write(&dir.path().join("README.md"), "");
        write(&dir.path().join("node_modules").join("x").join("index.js"), "");

        let files = source_files(dir.path(), &source_exts()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("src").join("a.js"), dir.path().join("src").join("b.ts")]
        );
    }

    #[test]
    fn test_check_clean_project() {
        let dir = tempdir().unwrap();
        write(
            &dir.path().join("index.js"),
            "const fs = require('fs');\nconst util = require('./util');\n",
        );
        write(&dir.path().join("util.js"), "module.exports = {};");

        let ctx = ResolutionContext::with_defaults(dir.path());
        let report = check_project(&OsFileSystem, &ctx, dir.path(), &source_exts()).unwrap();
        assert!(report.ok());
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.specifiers, 2);
    }

    #[test]
    fn test_check_reports_unresolved_with_line() {
        let dir = tempdir().unwrap();
        write(
            &dir.path().join("index.js"),
            "// header\nconst x = require('./missing');\n",
        );

        let ctx = ResolutionContext::with_defaults(dir.path());
        let report = check_project(&OsFileSystem, &ctx, dir.path(), &source_exts()).unwrap();
        assert_eq!(report.problems.len(), 1);
        let problem = &report.problems[0];
        assert_eq!(problem.kind, ProblemKind::Unresolved);
        assert_eq!(problem.line, Some(2));
        assert_eq!(problem.specifier.as_deref(), Some("./missing"));
    }

    #[test]
    fn test_check_reports_manifest_error() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("index.js"), "import bad from 'bad';\n");
        write(
            &dir.path().join("node_modules").join("bad").join("package.json"),
            "{ nope",
        );

        let ctx = ResolutionContext::with_defaults(dir.path());
        let report = check_project(&OsFileSystem, &ctx, dir.path(), &source_exts()).unwrap();
        assert_eq!(report.problems.len(), 1);
        assert_eq!(report.problems[0].kind, ProblemKind::ManifestError);
        assert!(report.problems[0].message.is_some());
    }

    #[test]
    fn test_check_uses_alias_roots() {
        let dir = tempdir().unwrap();
        write(
            &dir.path().join("src").join("app.jsx"),
            "import Nav from 'components/nav';\n",
        );
        write(&dir.path().join("src").join("components").join("nav.jsx"), "");

        let ctx = ResolutionContext::with_defaults(dir.path())
            .with_aliases(vec!["src".to_string()], Some(vec![".js".to_string(), ".jsx".to_string()]))
            .unwrap();
        let report = check_project(&OsFileSystem, &ctx, dir.path(), &source_exts()).unwrap();
        assert!(report.ok(), "{:?}", report.problems);
    }
}
