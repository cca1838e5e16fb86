// crates/regression-gate-core/src/core/pattern.rs
// ============================================================================
// Module: Regression Gate Patterns
// Description: Anchored glob matching over hierarchical test identifiers.
// Purpose: Decide whether a declared pattern covers a concrete identifier.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Patterns support a single wildcard, `*`, which matches any run of
//! characters (including `/` and the empty run). Matching is anchored at both
//! ends and case-sensitive; every other character is literal. Matching is a
//! pure function of the pattern and the identifier.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// The only wildcard character understood by patterns.
pub const WILDCARD: char = '*';

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Pattern construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Pattern string was empty.
    #[error("pattern must be non-empty")]
    Empty,
}

// ============================================================================
// SECTION: Pattern
// ============================================================================

/// Validated glob pattern, pre-split on `*`.
///
/// # Invariants
/// - `raw` is non-empty.
/// - `parts` is `raw.split('*')`, so a literal pattern has exactly one part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Pattern {
    /// Pattern text as declared.
    raw: String,
    /// Literal runs between wildcards.
    parts: Vec<String>,
}

impl Pattern {
    /// Creates a pattern from its declared text.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Empty`] for an empty string.
    pub fn new(raw: impl Into<String>) -> Result<Self, PatternError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(PatternError::Empty);
        }
        let parts = raw.split(WILDCARD).map(str::to_string).collect();
        Ok(Self {
            raw,
            parts,
        })
    }

    /// Returns the pattern text as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true when the pattern contains no wildcard.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.parts.len() == 1
    }

    /// Returns true when the identifier is covered by this pattern.
    #[must_use]
    pub fn matches(&self, identifier: &str) -> bool {
        match_parts(&self.parts, identifier)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

impl From<Pattern> for String {
    fn from(value: Pattern) -> Self {
        value.raw
    }
}

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Matches `identifier` against a glob `pattern` without building a [`Pattern`].
///
/// Malformed-looking patterns are matched literally; this never fails.
#[must_use]
pub fn matches(pattern: &str, identifier: &str) -> bool {
    let parts: Vec<&str> = pattern.split(WILDCARD).collect();
    match_parts(&parts, identifier)
}

/// Matches pre-split literal runs against an identifier.
///
/// The first run must be a prefix and the last run a suffix (without
/// overlapping); the runs in between are located left to right. Leftmost
/// placement is sufficient because `*` is the only wildcard, and empty runs
/// (from consecutive `*`) are skipped.
fn match_parts<S: AsRef<str>>(parts: &[S], identifier: &str) -> bool {
    match parts {
        [] => identifier.is_empty(),
        [literal] => literal.as_ref() == identifier,
        [first, middle @ .., last] => {
            let Some(rest) = identifier.strip_prefix(first.as_ref()) else {
                return false;
            };
            let Some(mut rest) = rest.strip_suffix(last.as_ref()) else {
                return false;
            };
            for part in middle {
                let part = part.as_ref();
                if part.is_empty() {
                    continue;
                }
                match rest.find(part) {
                    Some(index) => rest = &rest[index + part.len() ..],
                    None => return false,
                }
            }
            true
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, reason = "Test-only panic-based assertions are permitted.")]

    use super::match_parts;

    #[test]
    fn prefix_and_suffix_do_not_overlap() {
        assert!(!match_parts(&["ab", "ba"], "aba"));
        assert!(match_parts(&["ab", "ba"], "abba"));
    }

    #[test]
    fn empty_part_list_matches_only_empty_identifier() {
        let parts: [&str; 0] = [];
        assert!(match_parts(&parts, ""));
        assert!(!match_parts(&parts, "/a"));
    }
}
