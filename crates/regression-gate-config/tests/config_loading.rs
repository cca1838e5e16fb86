// crates/regression-gate-config/tests/config_loading.rs
// ============================================================================
// Module: Config Loading Tests
// Description: File resolution, size limits, and encoding checks.
// Purpose: Ensure config files are read under hard limits.
// ============================================================================

//! Config loading tests.

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
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use std::fs;

use common::FULL_TOML;
use regression_gate_config::ConfigError;
use regression_gate_config::RegressionGateConfig;

#[test]
fn load_reads_and_validates_an_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regression-gate.toml");
    fs::write(&path, FULL_TOML).unwrap();

    let config = RegressionGateConfig::load(Some(path.as_path())).unwrap();

    assert_eq!(config.suite.name, "regression");
    assert_eq!(config.registry().unwrap().len(), 3);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(RegressionGateConfig::load(Some(path.as_path())), Err(ConfigError::Io(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[suite\nname = 1").unwrap();
    assert!(matches!(RegressionGateConfig::load(Some(path.as_path())), Err(ConfigError::Parse(_))));
}

#[test]
fn oversized_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.toml");
    let padding = format!("{FULL_TOML}\n# {}\n", "x".repeat(1024 * 1024));
    fs::write(&path, padding).unwrap();
    let err = RegressionGateConfig::load(Some(path.as_path())).unwrap_err();
    assert!(err.to_string().contains("size limit"));
}

#[test]
fn non_utf8_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.toml");
    fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
    let err = RegressionGateConfig::load(Some(path.as_path())).unwrap_err();
    assert!(err.to_string().contains("utf-8"));
}

#[test]
fn invalid_content_fails_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invalid.toml");
    fs::write(&path, "[suite]\nname = \"\"\nfeatures = [\"a\"]\n").unwrap();
    assert!(matches!(RegressionGateConfig::load(Some(path.as_path())), Err(ConfigError::Invalid(_))));
}
