// crates/regression-gate-core/src/runtime/context.rs
// ============================================================================
// Module: Regression Gate Run Context
// Description: Per-run context and the scope handed to running features.
// Purpose: Carry the run mode and registry down to every test verdict.
// Dependencies: crate::core, crate::interfaces, crate::runtime::events
// ============================================================================

//! ## Overview
//! [`RunContext`] is created at orchestrator entry and passed unchanged to
//! every feature. [`FeatureScope`] is the recording surface a feature uses:
//! each recorded test is resolved against the expected-failure registry at
//! the moment it is recorded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::expectations::ExpectationRegistry;
use crate::core::identifiers::FeatureName;
use crate::core::identifiers::TestPath;
use crate::core::outcome::OutcomeKind;
use crate::core::outcome::TestFailure;
use crate::core::outcome::Verdict;
use crate::core::report::TestRecord;
use crate::interfaces::FeatureError;
use crate::runtime::events::RunEventKind;
use crate::runtime::events::RunEventSink;

// ============================================================================
// SECTION: Run Context
// ============================================================================

/// Per-run state shared with every feature.
#[derive(Clone, Copy)]
pub struct RunContext<'a> {
    /// True when running against a pre-existing local target.
    native: bool,
    /// Expected-failure registry for the run.
    registry: &'a ExpectationRegistry,
    /// Event sink for the run.
    events: &'a dyn RunEventSink,
}

impl<'a> RunContext<'a> {
    /// Creates a run context.
    #[must_use]
    pub const fn new(
        native: bool,
        registry: &'a ExpectationRegistry,
        events: &'a dyn RunEventSink,
    ) -> Self {
        Self {
            native,
            registry,
            events,
        }
    }

    /// Returns true for native runs.
    #[must_use]
    pub const fn native(&self) -> bool {
        self.native
    }

    /// Returns the expected-failure registry.
    #[must_use]
    pub const fn registry(&self) -> &'a ExpectationRegistry {
        self.registry
    }

    /// Returns the event sink.
    #[must_use]
    pub const fn events(&self) -> &'a dyn RunEventSink {
        self.events
    }
}

// ============================================================================
// SECTION: Feature Scope
// ============================================================================

/// Recording surface for one feature (or a nested suite inside it).
pub struct FeatureScope<'a> {
    /// Shared run context.
    context: RunContext<'a>,
    /// Feature being executed.
    feature: FeatureName,
    /// Path of this scope; tests are recorded beneath it.
    path: TestPath,
    /// Records collected so far, in execution order.
    records: Vec<TestRecord>,
}

impl<'a> FeatureScope<'a> {
    /// Creates a scope rooted at `path`.
    pub(crate) const fn new(context: RunContext<'a>, feature: FeatureName, path: TestPath) -> Self {
        Self {
            context,
            feature,
            path,
            records: Vec::new(),
        }
    }

    /// Returns the run context.
    #[must_use]
    pub const fn context(&self) -> &RunContext<'a> {
        &self.context
    }

    /// Returns true for native runs.
    #[must_use]
    pub const fn native(&self) -> bool {
        self.context.native
    }

    /// Returns the feature being executed.
    #[must_use]
    pub const fn feature(&self) -> &FeatureName {
        &self.feature
    }

    /// Returns the path of this scope.
    #[must_use]
    pub const fn path(&self) -> &TestPath {
        &self.path
    }

    /// Returns the records collected so far.
    #[must_use]
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    /// Records an observed outcome for the test `name` under this scope.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::Identifier`] when `name` is not a valid segment.
    pub fn record(
        &mut self,
        name: &str,
        observed: OutcomeKind,
        detail: Option<String>,
    ) -> Result<Verdict, FeatureError> {
        let path = self.path.child(name)?;
        Ok(self.record_at(path, observed, detail))
    }

    /// Runs a test body and records its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::Identifier`] when `name` is not a valid segment;
    /// the body does not run. Test failures are recorded, not returned.
    pub fn test<F>(&mut self, name: &str, body: F) -> Result<Verdict, FeatureError>
    where
        F: FnOnce(&RunContext<'a>) -> Result<(), TestFailure>,
    {
        let path = self.path.child(name)?;
        let verdict = match body(&self.context) {
            Ok(()) => self.record_at(path, OutcomeKind::Ok, None),
            Err(failure) => self.record_at(path, failure.kind(), Some(failure.to_string())),
        };
        Ok(verdict)
    }

    /// Resolves and stores the record for an already validated path.
    fn record_at(
        &mut self,
        path: TestPath,
        observed: OutcomeKind,
        detail: Option<String>,
    ) -> Verdict {
        let verdict = self.context.registry.resolve(path.as_str(), observed);
        self.context.events.emit(RunEventKind::TestResult {
            path: path.to_string(),
            observed,
            verdict: verdict.clone(),
        });
        self.records.push(TestRecord {
            path,
            observed,
            verdict: verdict.clone(),
            detail,
        });
        verdict
    }

    /// Runs a nested suite; its tests are recorded beneath `name`.
    ///
    /// # Errors
    ///
    /// Returns the nested suite's [`FeatureError`], after keeping the records
    /// it produced before failing.
    pub fn suite<F>(&mut self, name: &str, body: F) -> Result<(), FeatureError>
    where
        F: FnOnce(&mut FeatureScope<'a>) -> Result<(), FeatureError>,
    {
        let path = self.path.child(name)?;
        let mut nested = FeatureScope::new(self.context, self.feature.clone(), path);
        let result = body(&mut nested);
        self.records.append(&mut nested.records);
        result
    }

    /// Consumes the scope, returning its records.
    pub(crate) fn into_records(self) -> Vec<TestRecord> {
        self.records
    }
}
