//! `reqlink scan` command implementation.

use super::{fail, ErrorInfo, Session};
use miette::{IntoDiagnostic, Result};
use reqlink_core::imports::ImportSpecifier;
use reqlink_core::links::docs_url;
use reqlink_core::resolver::{CachedResolver, MemoryResolverCache};
use reqlink_core::{scan_imports, Config, Error, OsFileSystem, Resolved};
use reqlink_util::fs::read_to_string_lossy;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct ScanOutput {
    ok: bool,
    file: PathBuf,
    specifiers: Vec<ScannedSpecifier>,
}

#[derive(Serialize)]
struct ScannedSpecifier {
    #[serde(flatten)]
    spec: ImportSpecifier,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    docs_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorInfo>,
}

pub fn run(config: &Config, file: &Path, json: bool) -> Result<()> {
    let file = if file.is_absolute() {
        file.to_path_buf()
    } else {
        config.cwd.join(file)
    };

    let session = Session::load_or_exit(config, json);
    let source = read_to_string_lossy(&file).unwrap_or_else(|e| fail(&Error::Io(e), json));
    let from_dir = file.parent().unwrap_or(&config.cwd);

    let cache = MemoryResolverCache::new();
    let resolver = CachedResolver::new(&OsFileSystem, &session.ctx, &cache);

    let specifiers: Vec<ScannedSpecifier> = scan_imports(&source)
        .into_iter()
        .map(|spec| match resolver.find(&spec.raw, from_dir) {
            Ok(resolved) => ScannedSpecifier {
                status: resolved.status(),
                path: resolved.path().map(Path::to_path_buf),
                docs_url: docs_url(&spec.raw, &resolved),
                error: None,
                spec,
            },
            Err(e) => ScannedSpecifier {
                spec,
                status: "error",
                path: None,
                docs_url: None,
                error: Some(ErrorInfo::from(&e)),
            },
        })
        .collect();

    let out = ScanOutput {
        ok: specifiers.iter().all(|s| s.error.is_none()),
        file,
        specifiers,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
    } else {
        print_human(&out);
    }
    Ok(())
}

fn print_human(out: &ScanOutput) {
    if out.specifiers.is_empty() {
        println!("No specifiers found in {}", out.file.display());
        return;
    }

    for s in &out.specifiers {
        let target = match (&s.path, &s.error) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(error)) => format!("error: {}", error.message),
            (None, None) if s.status == Resolved::NotFound.status() => "NOT FOUND".to_string(),
            (None, None) => "core module".to_string(),
        };
        println!(
            "{:>5}  {:<20} {} -> {}",
            s.spec.line,
            s.spec.kind.as_str(),
            s.spec.raw,
            target
        );
    }
}
