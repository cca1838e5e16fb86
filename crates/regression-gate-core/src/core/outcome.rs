// crates/regression-gate-core/src/core/outcome.rs
// ============================================================================
// Module: Regression Gate Outcomes
// Description: Observed test outcomes and the verdicts derived from them.
// Purpose: Share one outcome vocabulary between features and the registry.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! `OutcomeKind` is the closed vocabulary the execution engine reports for a
//! test. A `Verdict` is what the gate surfaces after the expected-failure
//! registry has been consulted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Outcome Kind
// ============================================================================

/// Observed outcome of one executed test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Test passed.
    Ok,
    /// Test assertion failed.
    Fail,
    /// Test raised an error before reaching a verdict.
    Error,
    /// Test was skipped.
    Skip,
    /// Test produced no result.
    Null,
}

impl OutcomeKind {
    /// All outcome kinds in canonical order.
    pub const ALL: [Self; 5] = [Self::Ok, Self::Fail, Self::Error, Self::Skip, Self::Null];

    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Fail => "fail",
            Self::Error => "error",
            Self::Skip => "skip",
            Self::Null => "null",
        }
    }

    /// Returns true when the outcome is a failure unless expected.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Fail | Self::Error | Self::Null)
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown outcome label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown outcome kind `{0}` (expected ok, fail, error, skip, or null)")]
pub struct UnknownOutcomeKind(pub String);

impl FromStr for OutcomeKind {
    type Err = UnknownOutcomeKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownOutcomeKind(value.to_string()))
    }
}

// ============================================================================
// SECTION: Test Failure
// ============================================================================

/// Failure raised by a test body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestFailure {
    /// An assertion did not hold.
    #[error("assertion failed: {0}")]
    Assertion(String),
    /// The test hit an error outside its assertions.
    #[error("test error: {0}")]
    Error(String),
    /// The test decided to skip itself.
    #[error("skipped: {0}")]
    Skipped(String),
}

impl TestFailure {
    /// Returns the outcome kind reported for this failure.
    #[must_use]
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Self::Assertion(_) => OutcomeKind::Fail,
            Self::Error(_) => OutcomeKind::Error,
            Self::Skipped(_) => OutcomeKind::Skip,
        }
    }
}

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Outcome surfaced to the user after expected-failure resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// Test passed and no expectation covered it.
    Passed,
    /// Test was skipped and no expectation covered it.
    Skipped,
    /// Observed outcome matched a declared expectation.
    Expected {
        /// Reason attached to the matching expectation.
        reason: String,
    },
    /// Observed failure with no matching expectation.
    Regression,
}

impl Verdict {
    /// Returns true when the verdict fails the run.
    #[must_use]
    pub const fn is_regression(&self) -> bool {
        matches!(self, Self::Regression)
    }

    /// Returns a stable label for the verdict.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Skipped => "skipped",
            Self::Expected {
                ..
            } => "expected",
            Self::Regression => "regression",
        }
    }
}
