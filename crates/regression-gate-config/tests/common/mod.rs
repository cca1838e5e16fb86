// crates/regression-gate-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for regression-gate-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use regression_gate_config::ConfigError;
use regression_gate_config::RegressionGateConfig;

/// Minimal valid configuration for a native run.
pub const MINIMAL_TOML: &str = r#"
[run]
native = true

[suite]
name = "regression"
features = ["e2e.test_operator"]

[[features]]
name = "e2e.test_operator"
command = ["true"]
"#;

/// Full configuration mirroring a cluster-backed regression suite.
pub const FULL_TOML: &str = r#"
[run]
events = "file"
event_log = "target/regression-events.jsonl"

[suite]
name = "regression"
features = ["e2e.test_operator", "e2e.test_clickhouse"]

[expected_failures]
"/regression/e2e.test_operator/test_003*" = [
  { kind = "error", reason = "hits timeout" },
  { kind = "fail", reason = "label changes" },
]
"/regression/e2e.test_clickhouse/test_ch_001*" = { kind = "fail", reason = "quorum test needs refactoring" }
"/regression/*" = { kind = "skip", reason = "storage class missing" }

[[features]]
name = "e2e.test_operator"
command = ["cargo", "test", "--test", "operator"]

[[features]]
name = "e2e.test_clickhouse"
command = ["cargo", "test", "--test", "clickhouse"]
cwd = "tests"

[[cluster.resources]]
name = "kind"
acquire = ["kind", "create", "cluster"]
release = ["kind", "delete", "cluster"]

[[cluster.resources]]
name = "operator"
acquire = ["kubectl", "apply", "-f", "operator.yaml"]
release = ["kubectl", "delete", "-f", "operator.yaml"]
"#;

/// Parses and validates configuration text.
pub fn parse_valid(text: &str) -> Result<RegressionGateConfig, ConfigError> {
    let config = RegressionGateConfig::from_toml(text)?;
    config.validate()?;
    Ok(config)
}

/// Asserts that validation fails with a message containing `needle`.
pub fn assert_invalid(text: &str, needle: &str) {
    match parse_valid(text) {
        Ok(_) => panic!("expected config to be rejected: {needle}"),
        Err(err) => {
            let message = err.to_string();
            assert!(message.contains(needle), "unexpected error `{message}`, wanted `{needle}`");
        }
    }
}
