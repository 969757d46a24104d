//! Integration tests for `reqlink scan`, `reqlink check` and `reqlink config`.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn reqlink(cwd: &Path, config_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_reqlink"));
    cmd.arg("--cwd")
        .arg(cwd)
        .env("REQLINK_CONFIG_DIR", config_dir)
        .env_remove("REQLINK_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn json_of(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be valid JSON")
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_scan_reports_positions_and_status() {
    let project = tempdir().unwrap();
    let config_dir = tempdir().unwrap();
    let root = project.path();
    write(&root.join("package.json"), "{}");
    write(&root.join("util.js"), "");
    write(
        &root.join("app.js"),
        "const fs = require('fs');\nimport util from './util';\nimport x from 'nope';\n",
    );

    let output = reqlink(root, config_dir.path())
        .args(["--json", "scan", "app.js"])
        .output()
        .expect("Failed to run scan command");

    assert!(output.status.success());
    let json = json_of(&output);
    let specs = json["specifiers"].as_array().unwrap();
    assert_eq!(specs.len(), 3);

    assert_eq!(specs[0]["raw"], "fs");
    assert_eq!(specs[0]["kind"], "require");
    assert_eq!(specs[0]["status"], "core");
    assert_eq!(specs[0]["line"], 1);
    assert_eq!(specs[0]["span"]["start"], 20);
    assert_eq!(specs[0]["span"]["end"], 22);

    assert_eq!(specs[1]["raw"], "./util");
    assert_eq!(specs[1]["kind"], "import");
    assert_eq!(specs[1]["status"], "file");
    assert_eq!(specs[1]["line"], 2);

    assert_eq!(specs[2]["status"], "not_found");
}

#[test]
fn test_check_clean_project_exits_zero() {
    let project = tempdir().unwrap();
    let config_dir = tempdir().unwrap();
    let root = project.path();
    write(&root.join("package.json"), "{}");
    write(&root.join("src").join("a.js"), "module.exports = require('./b');");
    write(&root.join("src").join("b.js"), "module.exports = require('path');");
    write(
        &root.join("node_modules").join("junk").join("index.js"),
        "require('./does-not-exist');",
    );

    let output = reqlink(root, config_dir.path())
        .args(["--json", "check"])
        .output()
        .expect("Failed to run check command");

    assert!(output.status.success());
    let json = json_of(&output);
    assert_eq!(json["files_scanned"], 2);
    assert_eq!(json["specifiers"], 2);
    assert!(json["problems"].as_array().unwrap().is_empty());
}

#[test]
fn test_check_reports_problems_and_exits_one() {
    let project = tempdir().unwrap();
    let config_dir = tempdir().unwrap();
    let root = project.path();
    write(&root.join("package.json"), "{}");
    write(&root.join("src").join("a.js"), "\nrequire('./gone');\n");

    let output = reqlink(root, config_dir.path())
        .args(["--json", "check"])
        .output()
        .expect("Failed to run check command");

    assert_eq!(output.status.code(), Some(1));
    let json = json_of(&output);
    let problems = json["problems"].as_array().unwrap();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0]["kind"], "unresolved");
    assert_eq!(problems[0]["specifier"], "./gone");
    assert_eq!(problems[0]["line"], 2);
}

#[test]
fn test_check_respects_source_extensions() {
    let project = tempdir().unwrap();
    let config_dir = tempdir().unwrap();
    let root = project.path();
    write(&root.join("package.json"), "{}");
    write(&root.join("reqlink.json"), r#"{"source_extensions": [".mjs"]}"#);
    write(&root.join("a.js"), "require('./missing');");
    write(&root.join("b.mjs"), "import fs from 'fs';");

    let output = reqlink(root, config_dir.path())
        .args(["--json", "check"])
        .output()
        .expect("Failed to run check command");

    assert!(output.status.success());
    assert_eq!(json_of(&output)["files_scanned"], 1);
}

#[test]
fn test_config_layers() {
    let project = tempdir().unwrap();
    let config_dir = tempdir().unwrap();
    let root = project.path();
    write(&root.join("package.json"), "{}");
    write(
        &config_dir.path().join("config.json"),
        r#"{"resolve_extensions": [".js"], "bundler_alias_roots": ["lib"]}"#,
    );
    write(&root.join("reqlink.json"), r#"{"bundler_alias_roots": ["src"]}"#);

    let output = reqlink(root, config_dir.path())
        .args(["--json", "config"])
        .output()
        .expect("Failed to run config command");

    assert!(output.status.success());
    let json = json_of(&output);
    assert_eq!(json["settings"]["resolve_extensions"], serde_json::json!([".js"]));
    assert_eq!(json["settings"]["bundler_alias_roots"], serde_json::json!(["src"]));
    assert_eq!(json["sources"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_missing_explicit_file_exits_two() {
    let project = tempdir().unwrap();
    let config_dir = tempdir().unwrap();

    let output = reqlink(project.path(), config_dir.path())
        .args(["--json", "--config", "nope.json", "config"])
        .output()
        .expect("Failed to run config command");

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(json_of(&output)["error"]["code"], "CONFIG_READ");
}
