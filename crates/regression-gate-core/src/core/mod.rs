// crates/regression-gate-core/src/core/mod.rs
// ============================================================================
// Module: Regression Gate Core Types
// Description: Identifiers, outcomes, patterns, expectations, and reports.
// Purpose: Group the pure data model shared by the runtime and adapters.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types carry no I/O. Everything here is deterministic and can be
//! shared read-only across a run.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod expectations;
pub mod identifiers;
pub mod outcome;
pub mod pattern;
pub mod report;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use expectations::ExpectationRegistry;
pub use expectations::ExpectationRule;
pub use expectations::ExpectedOutcome;
pub use expectations::RegistryError;
pub use identifiers::FeatureName;
pub use identifiers::IdentifierError;
pub use identifiers::TestPath;
pub use outcome::OutcomeKind;
pub use outcome::TestFailure;
pub use outcome::UnknownOutcomeKind;
pub use outcome::Verdict;
pub use pattern::Pattern;
pub use pattern::PatternError;
pub use pattern::matches;
pub use report::FeatureSummary;
pub use report::RunReport;
pub use report::RunStatus;
pub use report::TestRecord;
pub use report::VerdictCounts;
