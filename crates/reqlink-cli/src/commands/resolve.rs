//! `reqlink resolve` command implementation.

use super::{fail, requesting_dir, Session, EXIT_NOT_FOUND};
use miette::{IntoDiagnostic, Result};
use reqlink_core::links::docs_url;
use reqlink_core::{find_module, Config, OsFileSystem, Resolved, SpecifierKind};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result for JSON output.
#[derive(Serialize)]
struct ResolveOutput {
    ok: bool,
    specifier: String,
    from: PathBuf,
    kind: SpecifierKind,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    docs_url: Option<String>,
}

pub fn run(config: &Config, specifier: &str, from: Option<&Path>, json: bool) -> Result<()> {
    let session = Session::load_or_exit(config, json);
    let from_dir = requesting_dir(&config.cwd, from);

    let resolved = find_module(&OsFileSystem, &session.ctx, specifier, &from_dir)
        .unwrap_or_else(|e| fail(&e, json));

    let out = ResolveOutput {
        ok: resolved.is_found(),
        specifier: specifier.to_string(),
        from: from_dir,
        kind: SpecifierKind::of(specifier),
        status: resolved.status(),
        path: resolved.path().map(Path::to_path_buf),
        docs_url: docs_url(specifier, &resolved),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
    } else {
        print_human(&out, &resolved, session.ctx.has_aliases());
    }

    if !out.ok {
        std::process::exit(EXIT_NOT_FOUND);
    }
    Ok(())
}

fn print_human(out: &ResolveOutput, resolved: &Resolved, has_aliases: bool) {
    match resolved {
        Resolved::Core(name) => println!("{name} (core module)"),
        Resolved::File(path) => println!("{}", path.display()),
        Resolved::Alias(path) => println!("{} (alias)", path.display()),
        Resolved::NotFound => {
            eprintln!(
                "Cannot find module '{}' from {}",
                out.specifier,
                out.from.display()
            );
            if !has_aliases && out.kind == SpecifierKind::Bare {
                eprintln!(
                    "hint: set bundler_alias_roots in reqlink.json if this is a project-relative import"
                );
            }
        }
    }
}
