//! Lexical path helpers: normalization, splitting into segments, and
//! locating the project root and user config directory.
//!
//! Nothing here except [`project_root`] touches the filesystem.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Name of the per-project config file.
pub const PROJECT_CONFIG_FILE: &str = "reqlink.json";

/// Environment variable to override the user config directory (for testing).
pub const CONFIG_DIR_ENV: &str = "REQLINK_CONFIG_DIR";

/// Lexically normalize a path.
///
/// Collapses `.` segments, redundant separators and `name/..` pairs.
/// A `..` directly under the root is dropped; leading `..` segments of a
/// relative path are kept. An empty result becomes `.`.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) => {}
                _ => out.push(comp),
            },
            _ => out.push(comp),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }

    out.iter().collect()
}

/// Split a path into its ordered segments.
///
/// The path is normalized first. A drive/volume prefix, when present, is the
/// first segment, followed by the root separator for rooted paths, then one
/// segment per directory, ending with the final component.
///
/// `join_segments(&split_path(p)) == normalize(p)`.
#[must_use]
pub fn split_path(path: &Path) -> Vec<OsString> {
    normalize(path)
        .components()
        .map(|c| c.as_os_str().to_os_string())
        .collect()
}

/// Rejoin segments produced by [`split_path`].
#[must_use]
pub fn join_segments<S: AsRef<Path>>(segments: &[S]) -> PathBuf {
    segments.iter().collect()
}

/// Find the project root by walking up from `cwd` looking for `package.json` or `.git`.
///
/// Returns the first directory containing either marker, or `None` if neither is found.
#[must_use]
pub fn project_root(cwd: &Path) -> Option<PathBuf> {
    let mut current = cwd.to_path_buf();

    loop {
        if current.join("package.json").exists() || current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Directory holding the user-level reqlink config.
///
/// Respects `REQLINK_CONFIG_DIR`; otherwise uses the platform config dir:
/// - Linux: `$XDG_CONFIG_HOME/reqlink` or `~/.config/reqlink`
/// - macOS: `~/Library/Application Support/reqlink`
/// - Windows: `%APPDATA%\reqlink`
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    dirs_next::config_dir().map(|p| p.join("reqlink"))
}

/// Path of the user-level config file, if a config directory is known.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    user_config_dir().map(|d| d.join("config.json"))
}
