use crate::error::{Error, Result};
use crate::paths::{self, PROJECT_CONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions probed by `require` when none are configured.
pub const DEFAULT_RESOLVE_EXTENSIONS: &[&str] = &[".js", ".json", ".node"];

/// Source files that `check` scans when none are configured.
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &[".js", ".jsx", ".mjs", ".cjs", ".ts", ".tsx"];

/// Runtime configuration for the reqlink CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Current working directory.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// Explicit settings file passed on the command line.
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
            config_file: None,
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Set an explicit settings file.
    #[must_use]
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Project root for this invocation: nearest ancestor of `cwd` holding
    /// `package.json` or `.git`, else `cwd` itself.
    #[must_use]
    pub fn project_root(&self) -> PathBuf {
        paths::project_root(&self.cwd).unwrap_or_else(|| self.cwd.clone())
    }
}

/// Resolution settings, as read from config files.
///
/// The resolver never reads these directly; they are validated into a
/// [`crate::resolver::ResolutionContext`] first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveSettings {
    /// Extensions appended to a candidate path, in order.
    pub resolve_extensions: Vec<String>,

    /// Bundler-style module roots, relative to the project root.
    /// Empty disables alias resolution.
    pub bundler_alias_roots: Vec<String>,

    /// Extensions for alias resolution; falls back to `resolve_extensions`.
    pub bundler_alias_extensions: Option<Vec<String>>,

    /// File suffixes treated as source files when scanning a project.
    pub source_extensions: Vec<String>,
}

impl Default for ResolveSettings {
    fn default() -> Self {
        Self {
            resolve_extensions: to_strings(DEFAULT_RESOLVE_EXTENSIONS),
            bundler_alias_roots: Vec::new(),
            bundler_alias_extensions: None,
            source_extensions: to_strings(DEFAULT_SOURCE_EXTENSIONS),
        }
    }
}

/// One config file. Keys that are present override the layers below.
#[derive(Debug, Default, Deserialize)]
struct SettingsLayer {
    resolve_extensions: Option<Vec<String>>,
    #[serde(alias = "webpack_resolve_modules")]
    bundler_alias_roots: Option<Vec<String>>,
    #[serde(alias = "webpack_resolve_extensions")]
    bundler_alias_extensions: Option<Vec<String>>,
    #[serde(alias = "extensions")]
    source_extensions: Option<Vec<String>>,
}

impl ResolveSettings {
    /// Load settings for a project.
    ///
    /// Layers, lowest first: built-in defaults, the user config file, the
    /// project's `reqlink.json`, then `explicit` if given. Missing user and
    /// project files are skipped; a missing explicit file is an error.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(user) = paths::user_config_path() {
            settings.apply_file(&user)?;
        }

        settings.apply_file(&project_root.join(PROJECT_CONFIG_FILE))?;

        if let Some(path) = explicit {
            if !settings.apply_file(path)? {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "config file does not exist",
                    ),
                });
            }
        }

        Ok(settings)
    }

    /// Overlay a config file onto these settings.
    ///
    /// Returns `Ok(false)` if the file does not exist.
    pub fn apply_file(&mut self, path: &Path) -> Result<bool> {
        if !path.is_file() {
            return Ok(false);
        }

        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.apply_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Applied config layer");
        Ok(true)
    }

    /// Overlay a JSON document onto these settings.
    pub fn apply_str(&mut self, json: &str) -> std::result::Result<(), serde_json::Error> {
        let layer: SettingsLayer = serde_json::from_str(json)?;

        if let Some(v) = layer.resolve_extensions {
            self.resolve_extensions = v;
        }
        if let Some(v) = layer.bundler_alias_roots {
            self.bundler_alias_roots = v;
        }
        if let Some(v) = layer.bundler_alias_extensions {
            self.bundler_alias_extensions = Some(v);
        }
        if let Some(v) = layer.source_extensions {
            self.source_extensions = v;
        }

        Ok(())
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
