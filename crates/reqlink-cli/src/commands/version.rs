use miette::{IntoDiagnostic, Result};
use reqlink_core::version::{version_string, SCHEMA_VERSION, VERSION};
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput {
    ok: bool,
    version: &'static str,
    schema_version: u32,
}

pub fn run(json: bool) -> Result<()> {
    if json {
        let out = VersionOutput {
            ok: true,
            version: VERSION,
            schema_version: SCHEMA_VERSION,
        };
        println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
    } else {
        println!("{}", version_string());
    }
    Ok(())
}
