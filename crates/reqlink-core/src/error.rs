use std::path::PathBuf;
use thiserror::Error;

/// Core error type for reqlink operations.
///
/// A module that cannot be found is not an error; resolution reports it as
/// [`crate::resolver::Resolved::NotFound`]. Errors here mean the project or
/// the configuration is broken.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read manifest at {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest at {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid manifest at {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether this error comes from a broken `package.json`.
    #[must_use]
    pub fn is_manifest(&self) -> bool {
        matches!(
            self,
            Self::ManifestRead { .. } | Self::ManifestParse { .. } | Self::ManifestInvalid { .. }
        )
    }

    /// Path of the manifest that failed, if this is a manifest error.
    #[must_use]
    pub fn manifest_path(&self) -> Option<&std::path::Path> {
        match self {
            Self::ManifestRead { path, .. }
            | Self::ManifestParse { path, .. }
            | Self::ManifestInvalid { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Stable machine-readable code for JSON output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO_ERROR",
            Self::ConfigRead { .. } => "CONFIG_READ",
            Self::ConfigParse { .. } => "CONFIG_PARSE",
            Self::InvalidConfig(_) => "INVALID_CONFIGURATION",
            Self::ManifestRead { .. } => "MANIFEST_READ",
            Self::ManifestParse { .. } => "MANIFEST_PARSE",
            Self::ManifestInvalid { .. } => "MANIFEST_INVALID",
            Self::Other(_) => "OTHER",
        }
    }
}

/// Result alias for reqlink-core.
pub type Result<T> = std::result::Result<T, Error>;
