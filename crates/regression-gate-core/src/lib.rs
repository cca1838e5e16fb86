// crates/regression-gate-core/src/lib.rs
// ============================================================================
// Module: Regression Gate Core Library
// Description: Public API surface for the regression gate orchestrator.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Regression gate runs an ordered suite of features against either a
//! provisioned cluster or a native target, and decides per test whether an
//! observed failure is a known (expected) failure mode or a regression.
//! Infrastructure and test execution plug in through explicit interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::ExpectationRegistry;
pub use crate::core::ExpectationRule;
pub use crate::core::ExpectedOutcome;
pub use crate::core::FeatureName;
pub use crate::core::FeatureSummary;
pub use crate::core::IdentifierError;
pub use crate::core::OutcomeKind;
pub use crate::core::Pattern;
pub use crate::core::PatternError;
pub use crate::core::RegistryError;
pub use crate::core::RunReport;
pub use crate::core::RunStatus;
pub use crate::core::TestFailure;
pub use crate::core::TestPath;
pub use crate::core::TestRecord;
pub use crate::core::UnknownOutcomeKind;
pub use crate::core::Verdict;
pub use crate::core::VerdictCounts;
pub use crate::core::matches;
pub use interfaces::ClusterHandle;
pub use interfaces::ClusterProvider;
pub use interfaces::Feature;
pub use interfaces::FeatureError;
pub use interfaces::FnFeature;
pub use interfaces::ProvisionError;
pub use interfaces::ReleaseError;
pub use interfaces::feature_fn;
pub use runtime::DeclarationError;
pub use runtime::FanoutEventSink;
pub use runtime::FeatureCatalog;
pub use runtime::FeatureScope;
pub use runtime::FileEventSink;
pub use runtime::LoadError;
pub use runtime::MemoryEventSink;
pub use runtime::NoopEventSink;
pub use runtime::Orchestrator;
pub use runtime::ResourceScope;
pub use runtime::RunContext;
pub use runtime::RunError;
pub use runtime::RunEvent;
pub use runtime::RunEventKind;
pub use runtime::RunEventSink;
pub use runtime::ScopeState;
pub use runtime::StderrEventSink;
pub use runtime::SuiteComposition;
pub use runtime::SuiteDeclaration;
