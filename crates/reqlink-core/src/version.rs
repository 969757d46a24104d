//! Version reporting for `reqlink version`.

/// Crate version of this build.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shape version of every `--json` document the CLI prints (`resolve`,
/// `explain`, `scan`, `check`, `config`, errors).
///
/// Scripts pin on this; increment it whenever a field is renamed or removed.
pub const SCHEMA_VERSION: u32 = 1;

/// One-line version for humans: `reqlink 0.1.0 (json schema 1)`.
///
/// Release builds may set `REQLINK_BUILD_GIT_HASH`; the commit is then
/// appended after the schema.
#[must_use]
pub fn version_string() -> String {
    let base = format!("reqlink {VERSION} (json schema {SCHEMA_VERSION})");
    match option_env!("REQLINK_BUILD_GIT_HASH") {
        Some(commit) => format!("{base} {commit}"),
        None => base,
    }
}
