//! Resolution tracing for the `explain` command.
//!
//! Provides step-by-step traces of module resolution for debugging
//! and understanding why a specifier resolves to a particular file.

use serde::Serialize;
use std::path::PathBuf;

/// Maximum number of tried paths to record.
pub const MAX_TRIED_PATHS: usize = 64;

/// A single step in the resolution trace.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveTraceStep {
    /// Step name (e.g., "classify_specifier", "load_as_file", "load_index")
    pub step: &'static str,
    /// Whether this step succeeded
    pub ok: bool,
    /// Human-readable description of what happened
    pub detail: String,
    /// File path involved in this step, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ResolveTraceStep {
    /// Create a new trace step.
    pub fn new(step: &'static str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            step,
            ok,
            detail: detail.into(),
            path: None,
        }
    }

    /// Set the path for this step.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Warning generated during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceWarning {
    /// Warning code (one of [`warning_codes`])
    pub code: &'static str,
    /// Human-readable warning message
    pub message: String,
}

impl TraceWarning {
    /// Create a new warning.
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Complete resolution trace.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveTrace {
    /// Ordered list of resolution steps
    pub steps: Vec<ResolveTraceStep>,
    /// Warnings generated during resolution
    pub warnings: Vec<TraceWarning>,
    /// Every path probed for existence, in probe order (capped)
    pub tried: Vec<PathBuf>,
    /// Whether `tried` hit [`MAX_TRIED_PATHS`]
    pub tried_truncated: bool,
}

impl ResolveTrace {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step to the trace.
    pub fn add_step(&mut self, step: ResolveTraceStep) {
        self.steps.push(step);
    }

    /// Add a warning to the trace.
    pub fn add_warning(&mut self, warning: TraceWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Record a probed path.
    pub fn add_tried(&mut self, path: PathBuf) {
        if self.tried.len() < MAX_TRIED_PATHS {
            self.tried.push(path);
        } else {
            self.tried_truncated = true;
        }
    }
}

/// Step names used in resolution tracing.
pub mod steps {
    pub const CLASSIFY_SPECIFIER: &str = "classify_specifier";
    pub const CORE_MODULE: &str = "core_module";
    pub const LOAD_AS_FILE: &str = "load_as_file";
    pub const LOAD_AS_DIRECTORY: &str = "load_as_directory";
    pub const READ_MANIFEST: &str = "read_manifest";
    pub const LOAD_INDEX: &str = "load_index";
    pub const NODE_MODULES_PATHS: &str = "node_modules_paths";
    pub const SEARCH_NODE_MODULES: &str = "search_node_modules";
    pub const RESOLVE_ALIAS: &str = "resolve_alias";
    pub const FINAL_PATH: &str = "final_path";
}

/// Warning codes used in resolution tracing.
pub mod warning_codes {
    /// A start directory segment named `node_modules` was skipped, so no
    /// `node_modules/node_modules` candidate was searched.
    pub const NODE_MODULES_SEGMENT_SKIPPED: &str = "node_modules_segment_skipped";
    /// The manifest had a `main` field that was not a string.
    pub const MAIN_NOT_STRING: &str = "main_not_string";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tried_is_capped() {
        let mut trace = ResolveTrace::new();
        for i in 0..(MAX_TRIED_PATHS + 5) {
            trace.add_tried(PathBuf::from(format!("/p/{i}")));
        }
        assert_eq!(trace.tried.len(), MAX_TRIED_PATHS);
        assert!(trace.tried_truncated);
    }

    #[test]
    fn test_duplicate_warnings_collapse() {
        let mut trace = ResolveTrace::new();
        let w = TraceWarning::new(warning_codes::NODE_MODULES_SEGMENT_SKIPPED, "skipped");
        trace.add_warning(w.clone());
        trace.add_warning(w);
        assert_eq!(trace.warnings.len(), 1);
    }

    #[test]
    fn test_step_with_path() {
        let mut trace = ResolveTrace::new();
        trace.add_step(ResolveTraceStep::new(steps::LOAD_AS_FILE, false, "no file").with_path("/p/x"));
        assert!(!trace.steps[0].ok);
        assert_eq!(trace.steps[0].step, "load_as_file");
        assert_eq!(trace.steps[0].path, Some(PathBuf::from("/p/x")));
    }
}
