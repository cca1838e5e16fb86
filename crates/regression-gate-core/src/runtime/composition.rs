// crates/regression-gate-core/src/runtime/composition.rs
// ============================================================================
// Module: Suite Composition
// Description: Ordered feature declaration resolved and run as child units.
// Purpose: Execute declared features sequentially under the suite path.
// Dependencies: crate::core, crate::interfaces, crate::runtime, thiserror
// ============================================================================

//! ## Overview
//! A [`SuiteDeclaration`] names the suite and the features it runs, in order.
//! [`SuiteComposition::resolve`] binds every name through the catalog before
//! anything runs, so a broken declaration fails with zero features executed.
//! Failing tests inside a feature are recorded and never stop later
//! features; an unrecoverable feature error aborts the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::FeatureName;
use crate::core::identifiers::IdentifierError;
use crate::core::identifiers::TestPath;
use crate::core::report::FeatureSummary;
use crate::core::report::RunReport;
use crate::interfaces::Feature;
use crate::runtime::catalog::FeatureCatalog;
use crate::runtime::catalog::LoadError;
use crate::runtime::context::FeatureScope;
use crate::runtime::context::RunContext;
use crate::runtime::events::RunEventKind;
use crate::runtime::orchestrator::RunError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Suite declaration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// Suite name is not a valid path segment.
    #[error("invalid suite name: {0}")]
    InvalidSuiteName(IdentifierError),
    /// Suite declares no features.
    #[error("suite `{0}` declares no features")]
    NoFeatures(String),
    /// Feature name is not a valid path segment.
    #[error("invalid feature name `{feature}`: {source}")]
    InvalidFeatureName {
        /// Offending feature name.
        feature: FeatureName,
        /// Segment validation failure.
        source: IdentifierError,
    },
    /// Feature declared twice.
    #[error("feature `{0}` is declared more than once")]
    DuplicateFeature(FeatureName),
}

// ============================================================================
// SECTION: Declaration
// ============================================================================

/// Suite name plus ordered feature names.
///
/// # Invariants
/// - The suite name and each feature name are valid path segments.
/// - At least one feature; no duplicates. Order is run order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteDeclaration {
    /// Root path of the suite.
    path: TestPath,
    /// Features in run order, with their child paths.
    features: Vec<(FeatureName, TestPath)>,
}

impl SuiteDeclaration {
    /// Builds a validated declaration.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError`] when a name is malformed, the feature list
    /// is empty, or a feature is listed twice.
    pub fn new<I, N>(name: &str, features: I) -> Result<Self, DeclarationError>
    where
        I: IntoIterator<Item = N>,
        N: Into<FeatureName>,
    {
        let path = TestPath::root(name).map_err(DeclarationError::InvalidSuiteName)?;
        let mut resolved: Vec<(FeatureName, TestPath)> = Vec::new();
        for feature in features {
            let feature = feature.into();
            if resolved.iter().any(|(existing, _)| existing == &feature) {
                return Err(DeclarationError::DuplicateFeature(feature));
            }
            let child = match path.child(feature.as_str()) {
                Ok(child) => child,
                Err(source) => {
                    return Err(DeclarationError::InvalidFeatureName {
                        feature,
                        source,
                    });
                }
            };
            resolved.push((feature, child));
        }
        if resolved.is_empty() {
            return Err(DeclarationError::NoFeatures(name.to_string()));
        }
        Ok(Self {
            path,
            features: resolved,
        })
    }

    /// Returns the suite path.
    #[must_use]
    pub const fn path(&self) -> &TestPath {
        &self.path
    }

    /// Returns the feature names in run order.
    pub fn features(&self) -> impl Iterator<Item = &FeatureName> {
        self.features.iter().map(|(feature, _)| feature)
    }

    /// Returns the number of declared features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Always false; a declaration holds at least one feature.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

// ============================================================================
// SECTION: Composition
// ============================================================================

/// Declaration whose features have all been resolved through a catalog.
pub struct SuiteComposition<'a> {
    /// Declaration being run.
    declaration: &'a SuiteDeclaration,
    /// Resolved features, aligned with the declaration order.
    resolved: Vec<&'a dyn Feature>,
}

impl<'a> SuiteComposition<'a> {
    /// Resolves every declared feature before anything runs.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] for the first unregistered name.
    pub fn resolve(
        declaration: &'a SuiteDeclaration,
        catalog: &'a FeatureCatalog,
    ) -> Result<Self, LoadError> {
        let resolved = declaration
            .features()
            .map(|feature| catalog.load(feature))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            declaration,
            resolved,
        })
    }

    /// Returns the declaration being run.
    #[must_use]
    pub const fn declaration(&self) -> &'a SuiteDeclaration {
        self.declaration
    }

    /// Runs each feature in order, appending its records to `report`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Feature`] when a feature raises an unrecoverable
    /// error; later features do not run. The error carries the report so far,
    /// including the aborted feature's records and summary.
    pub fn run(
        &self,
        context: RunContext<'_>,
        mut report: RunReport,
    ) -> Result<RunReport, RunError> {
        let events = context.events();
        for ((feature, path), runnable) in self.declaration.features.iter().zip(&self.resolved) {
            events.emit(RunEventKind::FeatureStarted {
                feature: feature.to_string(),
                path: path.to_string(),
            });
            let mut scope = FeatureScope::new(context, feature.clone(), path.clone());
            let result = runnable.run(&mut scope);
            let records = scope.into_records();
            let summary = FeatureSummary {
                feature: feature.clone(),
                path: path.clone(),
                tests: records.len(),
                regressions: records.iter().filter(|record| record.verdict.is_regression()).count(),
                aborted: result.is_err(),
            };
            events.emit(RunEventKind::FeatureFinished {
                feature: feature.to_string(),
                tests: summary.tests,
                regressions: summary.regressions,
                aborted: summary.aborted,
            });
            report.push_feature(summary, records);
            if let Err(source) = result {
                return Err(RunError::Feature {
                    feature: feature.clone(),
                    source,
                    report: Box::new(report),
                });
            }
        }
        Ok(report)
    }
}
