//! `reqlink check` command implementation.
//!
//! Exits with [`EXIT_NOT_FOUND`] when any specifier in the project fails to
//! resolve, so it can gate CI.

use super::{fail, Session, EXIT_NOT_FOUND};
use miette::{IntoDiagnostic, Result};
use reqlink_core::{check_project, CheckReport, Config, OsFileSystem, ProblemKind};
use std::path::Path;
use tracing::info;

pub fn run(config: &Config, dir: Option<&Path>, json: bool) -> Result<()> {
    let session = Session::load_or_exit(config, json);
    let root = match dir {
        Some(d) if d.is_absolute() => d.to_path_buf(),
        Some(d) => config.cwd.join(d),
        None => session.root.clone(),
    };

    info!(root = %root.display(), "checking project");
    let report = check_project(
        &OsFileSystem,
        &session.ctx,
        &root,
        &session.settings.source_extensions,
    )
    .unwrap_or_else(|e| fail(&e, json));

    if json {
        println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    } else {
        print_human(&report);
    }

    if !report.ok() {
        std::process::exit(EXIT_NOT_FOUND);
    }
    Ok(())
}

fn print_human(report: &CheckReport) {
    for problem in &report.problems {
        let file = problem
            .file
            .strip_prefix(&report.root)
            .unwrap_or(&problem.file);
        let location = match problem.line {
            Some(line) => format!("{}:{line}", file.display()),
            None => file.display().to_string(),
        };
        let spec = problem.specifier.as_deref().unwrap_or("");

        match problem.kind {
            ProblemKind::Unresolved => println!("{location}: cannot resolve '{spec}'"),
            ProblemKind::ManifestError => println!(
                "{location}: '{spec}': {}",
                problem.message.as_deref().unwrap_or("manifest error")
            ),
            ProblemKind::ReadError => println!(
                "{location}: unreadable: {}",
                problem.message.as_deref().unwrap_or("read error")
            ),
        }
    }

    if report.ok() {
        println!(
            "OK: {} specifiers in {} files",
            report.specifiers, report.files_scanned
        );
    } else {
        println!(
            "{} problems ({} specifiers in {} files)",
            report.problems.len(),
            report.specifiers,
            report.files_scanned
        );
    }
}
