//! `package.json` entry-point reading.

use super::probe::Probe;
use super::trace::{steps, warning_codes, TraceWarning};
use crate::error::{Error, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Manifest file name looked up in package directories.
pub const MANIFEST_FILE: &str = "package.json";

/// Entry point used when a directory has no manifest or the manifest has no `main`.
pub const DEFAULT_ENTRY: &str = "index.js";

/// Read the entry point (`main`) of a manifest known to exist.
///
/// A missing or non-string `main` yields [`DEFAULT_ENTRY`]. A manifest that
/// cannot be read or parsed is an error attributed to that manifest.
pub fn read_manifest_entry(probe: &mut Probe<'_>, manifest: &Path) -> Result<String> {
    let content = probe
        .read_to_string(manifest)
        .map_err(|source| Error::ManifestRead {
            path: manifest.to_path_buf(),
            source,
        })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| Error::ManifestParse {
        path: manifest.to_path_buf(),
        source,
    })?;

    let Some(object) = value.as_object() else {
        return Err(Error::ManifestInvalid {
            path: manifest.to_path_buf(),
            reason: "expected a JSON object".to_string(),
        });
    };

    let entry = match object.get("main") {
        Some(Value::String(main)) => main.clone(),
        Some(other) => {
            probe.warn(TraceWarning::new(
                warning_codes::MAIN_NOT_STRING,
                format!("Ignoring non-string main field: {other}"),
            ));
            DEFAULT_ENTRY.to_string()
        }
        None => DEFAULT_ENTRY.to_string(),
    };

    probe.step(
        steps::READ_MANIFEST,
        true,
        format!("Entry point: {entry}"),
        Some(manifest),
    );
    Ok(entry)
}

/// Path of the manifest for a directory.
#[must_use]
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
}
