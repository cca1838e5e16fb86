// crates/regression-gate-cli/tests/config_commands.rs
// ============================================================================
// Module: CLI Config and Expectations Command Tests
// Description: Integration tests for `config validate` and `expectations lookup`.
// Purpose: Ensure config errors fail closed and lookups report every match.
// Dependencies: regression-gate-cli binary, tempfile, serde_json
// ============================================================================

//! ## Overview
//! Spawns the `regression-gate` binary for the non-running subcommands.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use tempfile::TempDir;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Config with overlapping expected-failure patterns.
const CONFIG: &str = r#"
[run]
native = true

[suite]
name = "regression"
features = ["e2e.test_operator"]

[expected_failures]
"/regression/e2e.test_operator/test_003*" = [
  { kind = "error", reason = "hits timeout" },
  { kind = "fail", reason = "label changes" },
]
"/regression/*" = { kind = "skip", reason = "storage class missing" }

[[features]]
name = "e2e.test_operator"
command = ["true"]
"#;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the path of the CLI binary under test.
fn regression_gate_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_regression-gate"))
}

/// Writes `config` into a fresh temp dir and returns both.
fn write_config(config: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("regression-gate.toml");
    fs::write(&path, config.trim()).expect("write config");
    (dir, path)
}

/// Runs the binary with `args`.
fn run_cli(args: &[&str]) -> Output {
    Command::new(regression_gate_bin())
        .args(args)
        .env_remove("REGRESSION_GATE_CONFIG")
        .output()
        .expect("run regression-gate")
}

// ============================================================================
// SECTION: Config Validate
// ============================================================================

/// Verifies a valid config is accepted.
#[test]
fn config_validate_accepts_valid_config() {
    let (_dir, config) = write_config(CONFIG);
    let output = run_cli(&["config", "validate", "--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Config valid."));
}

/// Verifies unknown outcome kinds are rejected.
#[test]
fn config_validate_rejects_unknown_outcome_kind() {
    let (_dir, config) = write_config(&CONFIG.replace("\"skip\"", "\"broken\""));
    let output = run_cli(&["config", "validate", "--config", config.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "{stderr}");
}

/// Verifies a suite feature without a command entry is rejected.
#[test]
fn config_validate_rejects_missing_feature_command() {
    let text = CONFIG.replace(
        "features = [\"e2e.test_operator\"]",
        "features = [\"e2e.test_operator\", \"e2e.test_keeper\"]",
    );
    let (_dir, config) = write_config(&text);
    let output = run_cli(&["config", "validate", "--config", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("e2e.test_keeper"));
}

/// Verifies `--native` lets a cluster-less config validate, matching `run --native`.
#[test]
fn config_validate_native_flag_matches_run() {
    let (_dir, config) = write_config(&CONFIG.replace("native = true", "native = false"));
    let path = config.to_str().unwrap();

    let cluster = run_cli(&["config", "validate", "--config", path]);
    assert!(!cluster.status.success());
    assert!(String::from_utf8_lossy(&cluster.stderr).contains("[[cluster.resources]]"));

    let native = run_cli(&["config", "validate", "--native", "--config", path]);
    assert!(native.status.success(), "stderr: {}", String::from_utf8_lossy(&native.stderr));
}

/// Verifies a missing config file fails closed.
#[test]
fn config_validate_rejects_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");
    let output = run_cli(&["config", "validate", "--config", missing.to_str().unwrap()]);
    assert!(!output.status.success());
}

// ============================================================================
// SECTION: Expectations Lookup
// ============================================================================

/// Verifies every matching pattern contributes, in declaration order.
#[test]
fn lookup_reports_union_of_matches() {
    let (_dir, config) = write_config(CONFIG);
    let output = run_cli(&[
        "expectations",
        "lookup",
        "/regression/e2e.test_operator/test_003_labels",
        "--config",
        config.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let value: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(value["patterns"].as_array().unwrap().len(), 2);
    let kinds: Vec<&str> = value["expected"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["error", "fail", "skip"]);
    assert!(value["verdict"].is_null());
}

/// Verifies `--outcome` resolves a verdict, case-insensitively.
#[test]
fn lookup_resolves_verdict_for_outcome() {
    let (_dir, config) = write_config(CONFIG);
    let output = run_cli(&[
        "expectations",
        "lookup",
        "/regression/e2e.test_operator/test_003_labels",
        "--outcome",
        "FAIL",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("verdict for fail: expected (label changes)"), "{stdout}");
}

/// Verifies an unmatched failure resolves to a regression.
#[test]
fn lookup_reports_regression_for_unmatched_failure() {
    let text = CONFIG.replace("\"/regression/*\"", "\"/other/*\"");
    let (_dir, config) = write_config(&text);
    let output = run_cli(&[
        "expectations",
        "lookup",
        "/regression/e2e.test_operator/test_001",
        "--outcome",
        "error",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No expected failures match"), "{stdout}");
    assert!(stdout.contains("verdict for error: regression"), "{stdout}");
}

/// Verifies malformed identifiers are rejected.
#[test]
fn lookup_rejects_invalid_identifier() {
    let (_dir, config) = write_config(CONFIG);
    let output = run_cli(&[
        "expectations",
        "lookup",
        "regression/no-leading-slash",
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid test identifier"));
}
