// crates/regression-gate-core/src/core/expectations.rs
// ============================================================================
// Module: Expected-Failure Registry
// Description: Ordered pattern -> expected outcome mapping and verdict override.
// Purpose: Decide whether an observed test outcome is a known failure mode.
// Dependencies: crate::core::{outcome, pattern}, serde, thiserror
// ============================================================================

//! ## Overview
//! The registry maps glob patterns to ordered expected-outcome entries. It is
//! built once before the first test runs and is read-only afterwards, so it can
//! be shared freely between readers.
//!
//! Matching patterns are additive: `lookup` returns the entries of every
//! pattern that covers the identifier, concatenated in declaration order. No
//! pattern overrides another, however specific it is.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::outcome::OutcomeKind;
use crate::core::outcome::Verdict;
use crate::core::pattern::Pattern;
use crate::core::pattern::PatternError;

// ============================================================================
// SECTION: Expected Outcome
// ============================================================================

/// Declared (outcome kind, reason) pair marking a known failure mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    /// Outcome kind that is acceptable for the matched tests.
    pub kind: OutcomeKind,
    /// Human-readable reason shown alongside the expected outcome.
    pub reason: String,
}

impl ExpectedOutcome {
    /// Creates an expected outcome entry.
    #[must_use]
    pub fn new(kind: OutcomeKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// Expected assertion failure.
    #[must_use]
    pub fn fail(reason: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Fail, reason)
    }

    /// Expected error.
    #[must_use]
    pub fn error(reason: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Error, reason)
    }

    /// Expected skip.
    #[must_use]
    pub fn skip(reason: impl Into<String>) -> Self {
        Self::new(OutcomeKind::Skip, reason)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Registry construction errors. All of them are start-up configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Pattern text was rejected.
    #[error("invalid expected-failure pattern: {0}")]
    InvalidPattern(#[from] PatternError),
    /// Pattern declared without any expected outcome.
    #[error("expected-failure pattern `{0}` has no expected outcomes")]
    EmptyOutcomes(String),
    /// Same pattern declared twice.
    #[error("expected-failure pattern `{0}` is declared more than once")]
    DuplicatePattern(String),
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// One declared pattern with its expected outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectationRule {
    /// Pattern covering test identifiers.
    pub pattern: Pattern,
    /// Ordered expected outcomes for matching tests.
    pub outcomes: Vec<ExpectedOutcome>,
}

/// Immutable expected-failure registry.
///
/// # Invariants
/// - Rules keep declaration order; patterns are unique.
/// - Every rule has at least one outcome. Reasons are free text and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpectationRegistry {
    /// Rules in declaration order.
    rules: Vec<ExpectationRule>,
}

impl ExpectationRegistry {
    /// Returns a registry with no expectations.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rules: Vec::new(),
        }
    }

    /// Builds a registry from `(pattern, outcomes)` pairs in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when a pattern is empty or duplicated, or when
    /// an entry list is empty.
    pub fn from_entries<I, P>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (P, Vec<ExpectedOutcome>)>,
        P: Into<String>,
    {
        let mut rules: Vec<ExpectationRule> = Vec::new();
        for (pattern, outcomes) in entries {
            let pattern = Pattern::new(pattern)?;
            if rules.iter().any(|rule| rule.pattern == pattern) {
                return Err(RegistryError::DuplicatePattern(pattern.to_string()));
            }
            if outcomes.is_empty() {
                return Err(RegistryError::EmptyOutcomes(pattern.to_string()));
            }
            rules.push(ExpectationRule {
                pattern,
                outcomes,
            });
        }
        Ok(Self {
            rules,
        })
    }

    /// Returns the number of declared patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when no pattern is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the declared rules in order.
    #[must_use]
    pub fn rules(&self) -> &[ExpectationRule] {
        &self.rules
    }

    /// Returns the expected outcomes for an identifier.
    ///
    /// Entries of every matching pattern are concatenated in declaration
    /// order. An empty result means the observed outcome is taken at face value.
    #[must_use]
    pub fn lookup(&self, identifier: &str) -> Vec<&ExpectedOutcome> {
        self.matching_rules(identifier).flat_map(|rule| rule.outcomes.iter()).collect()
    }

    /// Returns the patterns covering an identifier, in declaration order.
    #[must_use]
    pub fn matching_patterns(&self, identifier: &str) -> Vec<&Pattern> {
        self.matching_rules(identifier).map(|rule| &rule.pattern).collect()
    }

    /// Resolves the verdict surfaced for an observed outcome.
    #[must_use]
    pub fn resolve(&self, identifier: &str, observed: OutcomeKind) -> Verdict {
        let expected = self.lookup(identifier);
        if let Some(entry) = expected.iter().find(|entry| entry.kind == observed) {
            return Verdict::Expected {
                reason: entry.reason.clone(),
            };
        }
        match observed {
            OutcomeKind::Ok => Verdict::Passed,
            OutcomeKind::Skip => Verdict::Skipped,
            OutcomeKind::Fail | OutcomeKind::Error | OutcomeKind::Null => Verdict::Regression,
        }
    }

    /// Iterates rules whose pattern covers the identifier.
    fn matching_rules<'a, 'b>(
        &'a self,
        identifier: &'b str,
    ) -> impl Iterator<Item = &'a ExpectationRule> + use<'a, 'b> {
        self.rules.iter().filter(move |rule| rule.pattern.matches(identifier))
    }
}
