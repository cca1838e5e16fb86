// crates/regression-gate-cli/src/tests/i18n.rs
// ============================================================================
// Module: CLI Catalog Tests
// Description: Unit tests for catalog lookups and placeholder substitution.
// Purpose: Ensure every message the binary emits resolves to a template.
// Dependencies: regression-gate-cli i18n module
// ============================================================================

//! ## Overview
//! Verifies catalog keys used by the binary exist, placeholders substitute,
//! and unknown keys fall back to the key itself.

use crate::i18n::MessageArg;
use crate::i18n::has_key;
use crate::i18n::translate;

/// Keys the binary and wiring reference.
const USED_KEYS: &[&str] = &[
    "main.version",
    "output.stream.stdout",
    "output.stream.stderr",
    "output.stream.unknown",
    "output.write_failed",
    "config.load_failed",
    "config.validate.ok",
    "run.setup_failed",
    "run.event_log_failed",
    "run.failed",
    "run.serialize_failed",
    "expectations.identifier_invalid",
    "expectations.none",
    "expectations.pattern",
    "expectations.entry",
    "expectations.verdict",
    "expectations.verdict_reason",
    "expectations.serialize_failed",
];

#[test]
fn catalog_defines_every_used_key() {
    for key in USED_KEYS {
        assert!(has_key(key), "missing catalog key {key}");
    }
}

#[test]
fn translate_substitutes_every_placeholder() {
    let args = vec![MessageArg::new("path", "events.jsonl"), MessageArg::new("error", "denied")];
    let rendered = translate("run.event_log_failed", args);
    assert_eq!(rendered, "Failed to open event log events.jsonl: denied");
}

#[test]
fn translate_falls_back_to_key() {
    assert!(!has_key("missing.key"));
    assert_eq!(translate("missing.key", Vec::new()), "missing.key");
}

#[test]
fn t_macro_formats_named_arguments() {
    let rendered = crate::t!("expectations.entry", kind = "fail", reason = "flaky");
    assert_eq!(rendered, "expected fail: flaky");
}
