//! Runs the `varsmith` binary against snapshot files.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

const SNAPSHOT: &str = r##"{
  "collections": [
    { "id": "core", "name": "Core", "modes": [{ "modeId": "0:0", "name": "Default" }] },
    {
      "id": "mc",
      "name": "Mode Colors",
      "modes": [
        { "modeId": "1:0", "name": "Light" },
        { "modeId": "1:1", "name": "Dark" }
      ]
    }
  ],
  "variables": [
    {
      "id": "gray",
      "name": "palette/gray/900",
      "variableCollectionId": "core",
      "resolvedType": "COLOR",
      "valuesByMode": { "0:0": "#111111" }
    },
    {
      "id": "text",
      "name": "text/primary",
      "variableCollectionId": "mc",
      "resolvedType": "COLOR",
      "valuesByMode": {
        "1:0": { "type": "VARIABLE_ALIAS", "id": "gray" },
        "1:1": { "type": "VARIABLE_ALIAS", "id": "deleted" }
      }
    }
  ]
}"##;

fn varsmith(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_varsmith"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_snapshot(dir: &Path) -> String {
    let path = dir.join("design.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    path.to_str().unwrap().to_string()
}

// ============================================================================
// Successful runs
// ============================================================================

#[test]
fn writes_tokens_and_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let out = dir.path().join("out");

    let output = varsmith(&[&snapshot, "--out-dir", out.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let tokens: Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("tokens.json")).unwrap()).unwrap();
    assert_eq!(tokens["core"]["color"]["palette"]["gray.900"]["$value"], "#111111");
    assert_eq!(tokens["modeColors"]["color"]["text.primary"]["$value"], "#111111");

    let scss = std::fs::read_to_string(out.join("variables.scss")).unwrap();
    assert!(scss.contains("$color-text-primary--light: $color-gray-900;\n"));
    assert!(!scss.contains("--dark"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Export complete"));
    assert!(stdout.contains("Skipped"));
    assert!(stdout.contains("deleted"));
}

#[test]
fn format_flag_limits_output() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let out = dir.path().join("out");

    let output = varsmith(&[&snapshot, "-o", out.to_str().unwrap(), "--format", "scss"]);
    assert!(output.status.success());
    assert!(out.join("variables.scss").exists());
    assert!(!out.join("tokens.json").exists());
}

#[test]
fn config_file_sets_filenames() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let out = dir.path().join("dist");
    let config = dir.path().join("varsmith.yaml");
    std::fs::write(
        &config,
        format!(
            "output:\n  directory: {}\n  tokensFile: design-tokens.json\n  stylesheetFile: _tokens.scss\n\
             export:\n  stylesheet:\n    header: null\n",
            out.display()
        ),
    )
    .unwrap();

    let output = varsmith(&[&snapshot, "--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(out.join("design-tokens.json").exists());
    let scss = std::fs::read_to_string(out.join("_tokens.scss")).unwrap();
    assert!(scss.starts_with("$color-gray-900: #111111;\n"));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn strict_mode_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let out = dir.path().join("out");

    let output = varsmith(&[&snapshot, "-o", out.to_str().unwrap(), "--strict"]);
    assert!(!output.status.success());
    assert!(!out.join("tokens.json").exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("deleted"));
}

#[test]
fn nested_output_name_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let out = dir.path().join("out");
    let config = dir.path().join("varsmith.yaml");
    std::fs::write(&config, "output:\n  stylesheetFile: nested/variables.scss\n").unwrap();

    let output = varsmith(&[
        &snapshot,
        "--config",
        config.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("output.stylesheetFile"));
    assert!(!out.exists());
}

#[test]
fn missing_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let output = varsmith(&[missing.to_str().unwrap(), "-o", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.json"));
}

#[test]
fn missing_snapshot_argument_is_usage_error() {
    let output = varsmith(&[]);
    assert_eq!(output.status.code(), Some(2));
}
