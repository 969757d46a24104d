//! `reqlink config` command implementation.

use super::Session;
use miette::{IntoDiagnostic, Result};
use reqlink_core::paths::{user_config_path, PROJECT_CONFIG_FILE};
use reqlink_core::{Config, ResolveSettings};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct ConfigOutput {
    ok: bool,
    project_root: PathBuf,
    /// Config files that exist and were applied, lowest precedence first.
    sources: Vec<PathBuf>,
    settings: ResolveSettings,
    fingerprint: String,
}

pub fn run(config: &Config, json: bool) -> Result<()> {
    let session = Session::load_or_exit(config, json);

    let sources: Vec<PathBuf> = [
        user_config_path(),
        Some(session.root.join(PROJECT_CONFIG_FILE)),
        config.config_file.clone(),
    ]
    .into_iter()
    .flatten()
    .filter(|p| p.is_file())
    .collect();

    let out = ConfigOutput {
        ok: true,
        project_root: session.root.clone(),
        sources,
        fingerprint: session.ctx.fingerprint(),
        settings: session.settings,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
        return Ok(());
    }

    println!("Project root: {}", out.project_root.display());
    if out.sources.is_empty() {
        println!("Sources: (defaults only)");
    } else {
        println!("Sources:");
        for source in &out.sources {
            println!("  - {}", source.display());
        }
    }
    println!();
    println!(
        "resolve_extensions:       {}",
        out.settings.resolve_extensions.join(" ")
    );
    println!(
        "bundler_alias_roots:      {}",
        join_or(&out.settings.bundler_alias_roots, "(none)")
    );
    println!(
        "bundler_alias_extensions: {}",
        out.settings
            .bundler_alias_extensions
            .as_deref()
            .map_or_else(|| "(resolve_extensions)".to_string(), |e| e.join(" "))
    );
    println!(
        "source_extensions:        {}",
        out.settings.source_extensions.join(" ")
    );
    Ok(())
}

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(" ")
    }
}
