//! `reqlink explain` command implementation.
//!
//! Runs a traced resolution and prints each step, any warnings, and the
//! paths that were probed.

use super::{requesting_dir, ErrorInfo, Session, EXIT_ERROR, EXIT_NOT_FOUND};
use miette::{IntoDiagnostic, Result};
use reqlink_core::resolver::{ResolveTraceStep, TraceWarning};
use reqlink_core::{
    find_module_traced, Config, OsFileSystem, ResolveTrace, Resolved, SpecifierKind,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct ExplainOutput {
    ok: bool,
    specifier: String,
    from: PathBuf,
    kind: SpecifierKind,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved: Option<String>,
    trace: Vec<ResolveTraceStep>,
    warnings: Vec<TraceWarning>,
    tried: Vec<PathBuf>,
    tried_truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorInfo>,
}

pub fn run(config: &Config, specifier: &str, from: Option<&Path>, json: bool) -> Result<()> {
    let session = Session::load_or_exit(config, json);
    let from_dir = requesting_dir(&config.cwd, from);

    let mut trace = ResolveTrace::new();
    let result = find_module_traced(&OsFileSystem, &session.ctx, specifier, &from_dir, &mut trace);

    let (status, resolved, error) = match &result {
        Ok(r) => (
            r.status(),
            match r {
                Resolved::Core(name) => Some(name.clone()),
                other => other.path().map(|p| p.display().to_string()),
            },
            None,
        ),
        Err(e) => ("error", None, Some(ErrorInfo::from(e))),
    };

    let out = ExplainOutput {
        ok: resolved.is_some(),
        specifier: specifier.to_string(),
        from: from_dir,
        kind: SpecifierKind::of(specifier),
        status,
        resolved,
        trace: trace.steps,
        warnings: trace.warnings,
        tried: trace.tried,
        tried_truncated: trace.tried_truncated,
        error,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
    } else {
        print_human(&out);
    }

    if !out.ok {
        std::process::exit(if out.error.is_some() {
            EXIT_ERROR
        } else {
            EXIT_NOT_FOUND
        });
    }
    Ok(())
}

fn print_human(out: &ExplainOutput) {
    println!("Specifier: {}", out.specifier);
    println!("Kind: {}", out.kind);
    println!("From: {}", out.from.display());
    println!();

    if let Some(ref resolved) = out.resolved {
        println!("Resolved: {resolved} ({})", out.status);
    } else {
        println!("Status: UNRESOLVED");
        if let Some(ref error) = out.error {
            println!("Error: {}", error.code);
            println!("Message: {}", error.message);
        }
    }
    println!();

    println!("Resolution trace:");
    for (i, step) in out.trace.iter().enumerate() {
        let status = if step.ok { "OK" } else { "FAIL" };
        println!("  {}. [{}] {}: {}", i + 1, status, step.step, step.detail);
        if let Some(ref path) = step.path {
            println!("      path: {}", path.display());
        }
    }

    if !out.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &out.warnings {
            println!("  [{}] {}", warning.code, warning.message);
        }
    }

    if !out.tried.is_empty() && out.resolved.is_none() {
        println!();
        println!("Tried paths:");
        for path in &out.tried {
            println!("  - {}", path.display());
        }
        if out.tried_truncated {
            println!("  ...");
        }
    }
}
