// crates/regression-gate-core/src/runtime/orchestrator.rs
// ============================================================================
// Module: Regression Gate Orchestrator
// Description: Run entry point tying registry, composition, and resource scope.
// Purpose: Execute one regression run and produce its report.
// Dependencies: crate::core, crate::interfaces, crate::runtime, thiserror
// ============================================================================

//! ## Overview
//! The orchestrator receives the run mode and the expected-failure registry,
//! resolves the suite declaration, enters the resource scope, and runs the
//! composition inside it. Fatal errors release any held resource before they
//! propagate.
//!
//! Security posture: feature code and cluster providers are untrusted; every
//! failure they report is surfaced, never swallowed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::expectations::ExpectationRegistry;
use crate::core::identifiers::FeatureName;
use crate::core::report::RunReport;
use crate::core::report::RunStatus;
use crate::interfaces::ClusterProvider;
use crate::interfaces::FeatureError;
use crate::interfaces::ProvisionError;
use crate::interfaces::ReleaseError;
use crate::runtime::catalog::FeatureCatalog;
use crate::runtime::catalog::LoadError;
use crate::runtime::composition::SuiteComposition;
use crate::runtime::composition::SuiteDeclaration;
use crate::runtime::context::RunContext;
use crate::runtime::events::RunEventKind;
use crate::runtime::events::RunEventSink;
use crate::runtime::scope::ResourceScope;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal run errors. Regressions are not errors; they live in the report.
#[derive(Debug, Error)]
pub enum RunError {
    /// Run was misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Declared feature could not be resolved.
    #[error("configuration error: {0}")]
    UnknownFeature(#[from] LoadError),
    /// Cluster acquisition failed; no feature ran.
    #[error(transparent)]
    Provision(#[from] ProvisionError),
    /// Cluster release failed after a successful body.
    #[error(transparent)]
    Release(#[from] ReleaseError),
    /// Feature raised an unrecoverable error.
    #[error("feature `{feature}` failed: {source}")]
    Feature {
        /// Feature that aborted.
        feature: FeatureName,
        /// Underlying feature error.
        source: FeatureError,
        /// Report collected up to and including the aborted feature.
        report: Box<RunReport>,
    },
}

impl RunError {
    /// Returns the report collected before a feature aborted the run.
    #[must_use]
    pub fn partial_report(&self) -> Option<&RunReport> {
        match self {
            Self::Feature {
                report,
                ..
            } => Some(report.as_ref()),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Entry point for one regression run.
pub struct Orchestrator<'a> {
    /// Suite to run.
    declaration: &'a SuiteDeclaration,
    /// Feature registrations.
    catalog: &'a FeatureCatalog,
    /// Expected-failure registry for the run.
    registry: &'a ExpectationRegistry,
    /// Event sink for the run.
    events: &'a dyn RunEventSink,
    /// Cluster resources for non-native runs, in acquisition order.
    resources: Vec<&'a dyn ClusterProvider>,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator with no cluster resources.
    #[must_use]
    pub const fn new(
        declaration: &'a SuiteDeclaration,
        catalog: &'a FeatureCatalog,
        registry: &'a ExpectationRegistry,
        events: &'a dyn RunEventSink,
    ) -> Self {
        Self {
            declaration,
            catalog,
            registry,
            events,
            resources: Vec::new(),
        }
    }

    /// Adds a cluster resource acquired for non-native runs.
    #[must_use]
    pub fn with_cluster_resource(mut self, resource: &'a dyn ClusterProvider) -> Self {
        self.resources.push(resource);
        self
    }

    /// Runs the suite.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] for fatal errors: an unresolvable feature, a
    /// non-native run without cluster resources, a failed acquisition or
    /// release, or an unrecoverable feature error. A run whose tests regress
    /// still returns `Ok`; check [`RunReport::status`]. After a feature
    /// aborts, [`RunError::partial_report`] holds the results so far.
    pub fn run(&self, native: bool) -> Result<RunReport, RunError> {
        self.events.emit(RunEventKind::RunStarted {
            suite: self.declaration.path().to_string(),
            native,
            features: self.declaration.len(),
            expectations: self.registry.len(),
        });
        let result = self.run_scoped(native);
        let (status, error) = match &result {
            Ok(report) => (report.status(), None),
            Err(err) => (RunStatus::Failed, Some(err.to_string())),
        };
        self.events.emit(RunEventKind::RunFinished {
            status,
            error,
        });
        result
    }

    /// Resolves the declaration, then runs it inside the resource scope.
    fn run_scoped(&self, native: bool) -> Result<RunReport, RunError> {
        let composition = SuiteComposition::resolve(self.declaration, self.catalog)?;
        let context = RunContext::new(native, self.registry, self.events);
        let scope = self
            .resources
            .iter()
            .fold(ResourceScope::new(native, self.events), |scope, resource| {
                scope.with_resource(*resource)
            });
        scope.execute(|| {
            composition.run(context, RunReport::new(self.declaration.path().clone(), native))
        })
    }
}
