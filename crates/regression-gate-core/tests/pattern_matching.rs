// crates/regression-gate-core/tests/pattern_matching.rs
// ============================================================================
// Module: Pattern Matcher Tests
// Description: Example and property tests for anchored `*` glob matching.
// Purpose: Pin wildcard semantics used by the expected-failure registry.
// ============================================================================

//! Pattern matcher tests.

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

use proptest::prelude::*;
use regression_gate_core::Pattern;
use regression_gate_core::PatternError;
use regression_gate_core::matches;

// ============================================================================
// SECTION: Examples
// ============================================================================

#[test]
fn star_crosses_path_separators() {
    assert!(matches("/regression/*", "/regression/e2e.test_operator/test_003/step"));
    assert!(matches(
        "/regression/e2e.test_operator/test_003*",
        "/regression/e2e.test_operator/test_003_labels"
    ));
    assert!(!matches("/regression/e2e.test_operator/test_003*", "/regression/e2e.test_operator/test_030"));
}

#[test]
fn matching_is_anchored_at_both_ends() {
    assert!(!matches("/suite/a", "/suite/a/t1"));
    assert!(!matches("suite/a/*", "/suite/a/t1"));
    assert!(!matches("*/t1", "/suite/a/t1x"));
    assert!(matches("*/t1", "/suite/a/t1"));
}

#[test]
fn middle_wildcards_match_in_order() {
    assert!(matches("/suite/*/test_*_ok", "/suite/a/b/test_12_ok"));
    assert!(!matches("/suite/*b*a", "/suite/ab"));
    assert!(matches("*a*b*", "xxaxxbxx"));
    assert!(!matches("*b*a*", "xxaxxbxx"));
}

#[test]
fn other_glob_syntax_is_literal() {
    assert!(matches("/suite/t?", "/suite/t?"));
    assert!(!matches("/suite/t?", "/suite/t1"));
    assert!(matches("/suite/[a]", "/suite/[a]"));
    assert!(!matches("/suite/[a]", "/suite/a"));
}

#[test]
fn matching_is_case_sensitive() {
    assert!(!matches("/Suite/*", "/suite/a"));
}

#[test]
fn empty_pattern_is_rejected() {
    assert_eq!(Pattern::new(""), Err(PatternError::Empty));
}

#[test]
fn literal_patterns_are_reported() {
    assert!(Pattern::new("/suite/a").unwrap().is_literal());
    assert!(!Pattern::new("/suite/*").unwrap().is_literal());
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn literal_pattern_matches_only_itself(pattern in "[a-z/_.]{1,12}", identifier in "[a-z/_.]{0,12}") {
        prop_assert_eq!(matches(&pattern, &identifier), pattern == identifier);
        prop_assert!(matches(&pattern, &pattern));
    }

    #[test]
    fn lone_star_matches_everything(identifier in ".*") {
        prop_assert!(matches("*", &identifier));
    }

    #[test]
    fn trailing_star_matches_any_suffix(prefix in "[a-z/]{0,8}", suffix in ".{0,8}") {
        let pattern = format!("{prefix}*");
        let identifier = format!("{prefix}{suffix}");
        prop_assert!(matches(&pattern, &identifier));
    }

    #[test]
    fn consecutive_stars_behave_as_one(
        head in "[ab/]{0,4}",
        tail in "[ab/]{0,4}",
        identifier in "[ab/]{0,10}",
    ) {
        let single = format!("{head}*{tail}");
        let double = format!("{head}**{tail}");
        prop_assert_eq!(matches(&single, &identifier), matches(&double, &identifier));
    }

    #[test]
    fn compiled_pattern_agrees_with_free_function(
        pattern in "[ab*/]{1,8}",
        identifier in "[ab/]{0,10}",
    ) {
        let compiled = Pattern::new(pattern.clone()).unwrap();
        prop_assert_eq!(compiled.matches(&identifier), matches(&pattern, &identifier));
    }
}
