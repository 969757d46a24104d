//! Validated resolution inputs.

use crate::config::{ResolveSettings, DEFAULT_RESOLVE_EXTENSIONS};
use crate::error::{Error, Result};
use reqlink_util::hash::blake3_parts;
use std::path::{Path, PathBuf};

/// Immutable inputs shared by every resolution in a session.
///
/// Construction validates the configuration, so a bad extension list fails
/// here rather than halfway through a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    project_root: PathBuf,
    extensions: Vec<String>,
    alias_roots: Vec<String>,
    alias_extensions: Option<Vec<String>>,
}

impl ResolutionContext {
    /// Context with the given extensions and no alias roots.
    pub fn new(project_root: impl Into<PathBuf>, extensions: Vec<String>) -> Result<Self> {
        validate_extensions("resolve_extensions", &extensions)?;
        Ok(Self {
            project_root: project_root.into(),
            extensions,
            alias_roots: Vec::new(),
            alias_extensions: None,
        })
    }

    /// Context with the default `.js`, `.json`, `.node` extensions.
    #[must_use]
    pub fn with_defaults(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            extensions: DEFAULT_RESOLVE_EXTENSIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            alias_roots: Vec::new(),
            alias_extensions: None,
        }
    }

    /// Build a context from loaded settings.
    pub fn from_settings(project_root: impl Into<PathBuf>, settings: &ResolveSettings) -> Result<Self> {
        Self::new(project_root, settings.resolve_extensions.clone())?.with_aliases(
            settings.bundler_alias_roots.clone(),
            settings.bundler_alias_extensions.clone(),
        )
    }

    /// Enable bundler alias resolution.
    ///
    /// `extensions` overrides the resolve extensions for alias lookups only.
    pub fn with_aliases(
        mut self,
        roots: Vec<String>,
        extensions: Option<Vec<String>>,
    ) -> Result<Self> {
        if let Some(root) = roots.iter().find(|r| r.trim().is_empty()) {
            return Err(Error::invalid_config(format!(
                "bundler_alias_roots contains an empty entry: {root:?}"
            )));
        }
        if let Some(root) = roots.iter().find(|r| Path::new(r.as_str()).has_root()) {
            return Err(Error::invalid_config(format!(
                "bundler_alias_roots: {root:?} must be relative to the project root"
            )));
        }
        if let Some(ref exts) = extensions {
            validate_extensions("bundler_alias_extensions", exts)?;
        }

        self.alias_roots = roots;
        self.alias_extensions = extensions;
        Ok(self)
    }

    /// Root that alias directories are relative to.
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Extensions appended during file and index resolution, in order.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Configured alias roots; empty when alias resolution is disabled.
    #[must_use]
    pub fn alias_roots(&self) -> &[String] {
        &self.alias_roots
    }

    /// Extensions used by alias resolution.
    #[must_use]
    pub fn alias_extensions(&self) -> &[String] {
        self.alias_extensions.as_deref().unwrap_or(&self.extensions)
    }

    /// Whether alias resolution runs after a failed Node resolution.
    #[must_use]
    pub fn has_aliases(&self) -> bool {
        !self.alias_roots.is_empty()
    }

    /// Stable digest of every field, for use in cache keys.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut parts = vec![
            "root".to_string(),
            self.project_root.to_string_lossy().into_owned(),
            "ext".to_string(),
        ];
        parts.extend(self.extensions.iter().cloned());
        parts.push("alias".to_string());
        parts.extend(self.alias_roots.iter().cloned());
        parts.push("alias_ext".to_string());
        if let Some(ref exts) = self.alias_extensions {
            parts.extend(exts.iter().cloned());
        }
        blake3_parts(&parts)
    }
}

fn validate_extensions(field: &str, extensions: &[String]) -> Result<()> {
    if extensions.is_empty() {
        return Err(Error::invalid_config(format!("{field} must not be empty")));
    }

    for ext in extensions {
        if ext.len() < 2 || !ext.starts_with('.') {
            return Err(Error::invalid_config(format!(
                "{field}: {ext:?} must start with '.' and name an extension"
            )));
        }
        if ext.contains('/') || ext.contains('\\') {
            return Err(Error::invalid_config(format!(
                "{field}: {ext:?} must not contain a path separator"
            )));
        }
    }

    Ok(())
}
