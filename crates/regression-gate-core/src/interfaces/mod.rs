// crates/regression-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Regression Gate Interfaces
// Description: Contracts for runnable features and cluster resources.
// Purpose: Define the seams between the orchestrator and external collaborators.
// Dependencies: crate::runtime, thiserror
// ============================================================================

//! ## Overview
//! Features and cluster resources are supplied by the embedding harness. The
//! orchestrator only sees these traits: it never provisions infrastructure or
//! invokes test code itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::core::identifiers::IdentifierError;
use crate::runtime::context::FeatureScope;

// ============================================================================
// SECTION: Feature
// ============================================================================

/// Unrecoverable feature errors. Failing tests are recorded, not raised.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Feature could not continue.
    #[error("feature aborted: {0}")]
    Aborted(String),
    /// Feature produced a malformed test identifier.
    #[error("invalid test identifier: {0}")]
    Identifier(#[from] IdentifierError),
}

/// Runnable unit loaded by name and executed as a child of a suite.
pub trait Feature {
    /// Runs the feature, recording tests through `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError`] only when the feature cannot continue; this
    /// aborts the whole run.
    fn run(&self, scope: &mut FeatureScope<'_>) -> Result<(), FeatureError>;
}

/// Feature backed by a closure.
pub struct FnFeature<F> {
    /// Closure invoked for each run.
    body: F,
}

impl<F> Feature for FnFeature<F>
where
    F: Fn(&mut FeatureScope<'_>) -> Result<(), FeatureError>,
{
    fn run(&self, scope: &mut FeatureScope<'_>) -> Result<(), FeatureError> {
        (self.body)(scope)
    }
}

/// Wraps a closure as a [`Feature`].
#[must_use]
pub fn feature_fn<F>(body: F) -> FnFeature<F>
where
    F: Fn(&mut FeatureScope<'_>) -> Result<(), FeatureError>,
{
    FnFeature {
        body,
    }
}

// ============================================================================
// SECTION: Cluster Resource
// ============================================================================

/// Opaque handle returned by a successful acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterHandle {
    /// Provider-defined handle identifier.
    id: String,
}

impl ClusterHandle {
    /// Creates a handle.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
        }
    }

    /// Returns the handle identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ClusterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id.fmt(f)
    }
}

/// Cluster acquisition failure. Fatal: no feature runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provisioning `{resource}` failed: {message}")]
pub struct ProvisionError {
    /// Resource that failed to provision.
    pub resource: String,
    /// Failure detail.
    pub message: String,
}

impl ProvisionError {
    /// Creates a provisioning error.
    #[must_use]
    pub fn new(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            message: message.into(),
        }
    }
}

/// Cluster release failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("releasing `{resource}` failed: {message}")]
pub struct ReleaseError {
    /// Resource that failed to release.
    pub resource: String,
    /// Failure detail.
    pub message: String,
}

impl ReleaseError {
    /// Creates a release error.
    #[must_use]
    pub fn new(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            message: message.into(),
        }
    }
}

/// Externally provisioned resource wrapped around non-native runs.
pub trait ClusterProvider {
    /// Stable resource name used in logs and errors.
    fn name(&self) -> &str;

    /// Acquires the resource.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when the resource cannot be provisioned.
    fn acquire(&self) -> Result<ClusterHandle, ProvisionError>;

    /// Releases a previously acquired resource.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError`] when teardown fails.
    fn release(&self, handle: ClusterHandle) -> Result<(), ReleaseError>;
}
