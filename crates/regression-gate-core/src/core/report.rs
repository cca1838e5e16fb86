// crates/regression-gate-core/src/core/report.rs
// ============================================================================
// Module: Regression Gate Run Report
// Description: Per-test records, per-feature summaries, and run status.
// Purpose: Collect verdicts for a run and decide its overall status.
// Dependencies: crate::core::{identifiers, outcome}, serde
// ============================================================================

//! ## Overview
//! A run passes when no test produced a regression. Expected outcomes stay in
//! the report so they remain visible for audit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use serde::Serialize;

use crate::core::identifiers::FeatureName;
use crate::core::identifiers::TestPath;
use crate::core::outcome::OutcomeKind;
use crate::core::outcome::Verdict;

// ============================================================================
// SECTION: Records
// ============================================================================

/// Verdict for one executed test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestRecord {
    /// Test identifier.
    pub path: TestPath,
    /// Outcome reported by the execution engine.
    pub observed: OutcomeKind,
    /// Verdict after expected-failure resolution.
    pub verdict: Verdict,
    /// Optional failure detail reported by the test.
    pub detail: Option<String>,
}

/// Summary of one feature run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSummary {
    /// Feature name as declared.
    pub feature: FeatureName,
    /// Suite path of the feature.
    pub path: TestPath,
    /// Number of tests recorded by the feature.
    pub tests: usize,
    /// Number of regressions recorded by the feature.
    pub regressions: usize,
    /// True when the feature raised an unrecoverable error.
    pub aborted: bool,
}

/// Overall run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// No regressions were recorded.
    Passed,
    /// At least one regression was recorded, or the run aborted.
    Failed,
}

impl RunStatus {
    /// Returns a stable label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

/// Verdict counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerdictCounts {
    /// Passed tests.
    pub passed: usize,
    /// Tests whose outcome matched an expectation.
    pub expected: usize,
    /// Skipped tests.
    pub skipped: usize,
    /// Regressions.
    pub regressions: usize,
}

// ============================================================================
// SECTION: Run Report
// ============================================================================

/// Collected results of one orchestrated run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Root suite path.
    suite: TestPath,
    /// Whether the run targeted a native environment.
    native: bool,
    /// Test records in execution order.
    records: Vec<TestRecord>,
    /// Feature summaries in execution order.
    features: Vec<FeatureSummary>,
}

impl RunReport {
    /// Creates an empty report for a suite.
    #[must_use]
    pub const fn new(suite: TestPath, native: bool) -> Self {
        Self {
            suite,
            native,
            records: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Returns the suite path.
    #[must_use]
    pub const fn suite(&self) -> &TestPath {
        &self.suite
    }

    /// Returns true when the run targeted a native environment.
    #[must_use]
    pub const fn native(&self) -> bool {
        self.native
    }

    /// Returns the test records in execution order.
    #[must_use]
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    /// Returns the feature summaries in execution order.
    #[must_use]
    pub fn features(&self) -> &[FeatureSummary] {
        &self.features
    }

    /// Returns the record for an identifier, if one was recorded.
    #[must_use]
    pub fn record(&self, path: &str) -> Option<&TestRecord> {
        self.records.iter().find(|record| record.path.as_str() == path)
    }

    /// Returns the regression records.
    pub fn regressions(&self) -> impl Iterator<Item = &TestRecord> {
        self.records.iter().filter(|record| record.verdict.is_regression())
    }

    /// Returns verdict counts.
    #[must_use]
    pub fn counts(&self) -> VerdictCounts {
        let mut counts = VerdictCounts::default();
        for record in &self.records {
            match record.verdict {
                Verdict::Passed => counts.passed += 1,
                Verdict::Skipped => counts.skipped += 1,
                Verdict::Expected {
                    ..
                } => counts.expected += 1,
                Verdict::Regression => counts.regressions += 1,
            }
        }
        counts
    }

    /// Returns the run status.
    #[must_use]
    pub fn status(&self) -> RunStatus {
        if self.records.iter().any(|record| record.verdict.is_regression())
            || self.features.iter().any(|feature| feature.aborted)
        {
            RunStatus::Failed
        } else {
            RunStatus::Passed
        }
    }

    /// Renders a plain-text summary.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let mode = if self.native { "native" } else { "cluster" };
        let _ = writeln!(out, "suite {} ({mode})", self.suite);
        for record in &self.records {
            let label = record.verdict.label();
            let _ = write!(out, "  {label:<10} {} [{}]", record.path, record.observed);
            if let Verdict::Expected {
                reason,
            } = &record.verdict
            {
                let _ = write!(out, " - {reason}");
            }
            if let Some(detail) = &record.detail {
                let _ = write!(out, " ({detail})");
            }
            out.push('\n');
        }
        let counts = self.counts();
        let _ = writeln!(
            out,
            "{}: {} passed, {} expected, {} skipped, {} regressions",
            self.status().as_str(),
            counts.passed,
            counts.expected,
            counts.skipped,
            counts.regressions
        );
        out
    }

    /// Appends records and the summary for one feature.
    pub(crate) fn push_feature(&mut self, summary: FeatureSummary, records: Vec<TestRecord>) {
        self.records.extend(records);
        self.features.push(summary);
    }
}
