//! Node `require(X)` resolution.
//!
//! Follows the "all together" pseudocode from the Node modules docs:
//!
//! ```text
//! require(X) from module at path Y
//!   1. If X is a core module, return it
//!   2. If X begins with '.' or is rooted
//!      a. LOAD_AS_FILE(Y + X)
//!      b. LOAD_AS_DIRECTORY(Y + X)
//!   3. LOAD_NODE_MODULES(X, Y)
//!   4. not found
//! ```
//!
//! Every stage returns the first path that satisfies it. Not finding a
//! module is `Ok(None)` / [`Resolved::NotFound`]; only a broken manifest is
//! an error, and it aborts the whole resolution.

use super::context::ResolutionContext;
use super::manifest::{manifest_path, read_manifest_entry};
use super::probe::{FileSystem, Probe};
use super::specifier::SpecifierKind;
use super::trace::{steps, warning_codes, ResolveTrace, TraceWarning};
use crate::error::Result;
use crate::paths::{join_segments, normalize, split_path};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Directory name searched for bare specifiers.
pub const NODE_MODULES: &str = "node_modules";

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A core module; the name is a sentinel, not a path.
    Core(String),
    /// A file found by the Node algorithm.
    File(PathBuf),
    /// A file found through a bundler alias root.
    Alias(PathBuf),
    /// Nothing matched.
    NotFound,
}

impl Resolved {
    /// The resolved file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(p) | Self::Alias(p) => Some(p),
            Self::Core(_) | Self::NotFound => None,
        }
    }

    /// Whether resolution succeeded (core modules included).
    #[must_use]
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    /// Stable status string for output.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::Core(_) => "core",
            Self::File(_) => "file",
            Self::Alias(_) => "alias",
            Self::NotFound => "not_found",
        }
    }
}

/// Resolves specifiers with the Node algorithm against one context.
///
/// Holds no state between calls; the same inputs against an unchanged
/// filesystem always give the same answer.
pub struct ModuleResolver<'a> {
    fs: &'a dyn FileSystem,
    ctx: &'a ResolutionContext,
}

impl<'a> ModuleResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, ctx: &'a ResolutionContext) -> Self {
        Self { fs, ctx }
    }

    /// Resolve `spec` as required from a file in `from_dir`.
    pub fn resolve(&self, spec: &str, from_dir: &Path) -> Result<Resolved> {
        resolve_require(&mut Probe::new(self.fs), self.ctx, spec, from_dir)
    }

    /// [`Self::resolve`], recording each step into `trace`.
    pub fn resolve_traced(
        &self,
        spec: &str,
        from_dir: &Path,
        trace: &mut ResolveTrace,
    ) -> Result<Resolved> {
        resolve_require(&mut Probe::traced(self.fs, trace), self.ctx, spec, from_dir)
    }
}

/// The top-level `require(X)` algorithm.
pub fn resolve_require(
    probe: &mut Probe<'_>,
    ctx: &ResolutionContext,
    spec: &str,
    from_dir: &Path,
) -> Result<Resolved> {
    if spec.is_empty() {
        probe.step(steps::CLASSIFY_SPECIFIER, false, "Specifier is empty", None);
        return Ok(Resolved::NotFound);
    }

    let kind = SpecifierKind::of(spec);
    probe.step(
        steps::CLASSIFY_SPECIFIER,
        true,
        format!("Specifier type: {kind}"),
        None,
    );

    let found = match kind {
        SpecifierKind::Core => {
            probe.step(steps::CORE_MODULE, true, format!("Core module: {spec}"), None);
            return Ok(Resolved::Core(spec.to_string()));
        }
        SpecifierKind::Relative => {
            let candidate = normalize(&from_dir.join(spec));
            match load_as_file(probe, &candidate, ctx.extensions()) {
                Some(found) => Some(found),
                None => load_as_directory(probe, &candidate, ctx.extensions())?,
            }
        }
        SpecifierKind::Bare => load_node_modules(probe, spec, from_dir, ctx.extensions())?,
    };

    Ok(match found {
        Some(path) => {
            probe.found(&path);
            Resolved::File(path)
        }
        None => Resolved::NotFound,
    })
}

/// `LOAD_AS_FILE(X)`: `X` itself, then `X` + each extension in order.
pub fn load_as_file(probe: &mut Probe<'_>, path: &Path, extensions: &[String]) -> Option<PathBuf> {
    trace!(path = %path.display(), "load_as_file");

    if let Some(found) = probe.file(path, None) {
        probe.step(steps::LOAD_AS_FILE, true, "Exact file exists", Some(&found));
        return Some(found);
    }

    for ext in extensions {
        if let Some(found) = probe.file(&with_suffix(path, ext), None) {
            probe.step(
                steps::LOAD_AS_FILE,
                true,
                format!("Found with extension: {ext}"),
                Some(&found),
            );
            return Some(found);
        }
    }

    probe.step(steps::LOAD_AS_FILE, false, "No matching file", Some(path));
    None
}

/// `LOAD_AS_DIRECTORY(X)`.
///
/// With a manifest, only its entry point is tried (as a file, then as an
/// index directory). Without one, the index files of `X` are tried.
pub fn load_as_directory(
    probe: &mut Probe<'_>,
    path: &Path,
    extensions: &[String],
) -> Result<Option<PathBuf>> {
    trace!(path = %path.display(), "load_as_directory");

    if let Some(manifest) = probe.file(&manifest_path(path), None) {
        let entry = read_manifest_entry(probe, &manifest)?;
        let main = normalize(&path.join(&entry));

        let found = match load_as_file(probe, &main, extensions) {
            Some(found) => Some(found),
            None => load_index(probe, &main, extensions),
        };
        if found.is_none() {
            probe.step(
                steps::LOAD_AS_DIRECTORY,
                false,
                format!("Manifest entry not found: {entry}"),
                Some(&main),
            );
        }
        return Ok(found);
    }

    Ok(load_index(probe, path, extensions))
}

/// `LOAD_INDEX(X)`: `X/index` + each extension in order.
pub fn load_index(probe: &mut Probe<'_>, path: &Path, extensions: &[String]) -> Option<PathBuf> {
    trace!(path = %path.display(), "load_index");

    for ext in extensions {
        if let Some(found) = probe.file(path, Some(&format!("index{ext}"))) {
            probe.step(
                steps::LOAD_INDEX,
                true,
                format!("Found index{ext}"),
                Some(&found),
            );
            return Some(found);
        }
    }

    probe.step(steps::LOAD_INDEX, false, "No index file", Some(path));
    None
}

/// `LOAD_NODE_MODULES(X, START)`: try each candidate directory in order.
pub fn load_node_modules(
    probe: &mut Probe<'_>,
    spec: &str,
    start: &Path,
    extensions: &[String],
) -> Result<Option<PathBuf>> {
    let dirs = node_modules_paths(start);
    probe.step(
        steps::NODE_MODULES_PATHS,
        true,
        format!("{} candidate directories", dirs.len()),
        Some(start),
    );

    if split_path(start).iter().any(|s| s.as_os_str() == NODE_MODULES) {
        probe.warn(TraceWarning::new(
            warning_codes::NODE_MODULES_SEGMENT_SKIPPED,
            "Start directory is inside node_modules; that segment gets no candidate of its own",
        ));
    }

    for dir in dirs {
        let candidate = dir.join(spec);

        if let Some(found) = load_as_file(probe, &candidate, extensions) {
            return Ok(Some(found));
        }
        if let Some(found) = load_as_directory(probe, &candidate, extensions)? {
            return Ok(Some(found));
        }

        probe.step(steps::SEARCH_NODE_MODULES, false, "Not found", Some(&dir));
    }

    Ok(None)
}

/// `NODE_MODULES_PATHS(START)`: candidate `node_modules` directories,
/// nearest first.
///
/// A segment that is itself named `node_modules` produces no candidate, so
/// the list never contains `node_modules/node_modules`. Node's own docs
/// describe it this way; it means a package inside `node_modules/x` does not
/// search `node_modules/x/../node_modules` twice.
#[must_use]
pub fn node_modules_paths(start: &Path) -> Vec<PathBuf> {
    let parts = split_path(start);

    parts
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, seg)| seg.as_os_str() != NODE_MODULES)
        .map(|(i, _)| join_segments(&parts[..=i]).join(NODE_MODULES))
        .collect()
}

/// `path` with `suffix` appended to its final component (`foo` -> `foo.js`).
pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}
