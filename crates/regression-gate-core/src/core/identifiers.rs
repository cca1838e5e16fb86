// crates/regression-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Regression Gate Identifiers
// Description: Hierarchical test identifiers and feature names.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Test identifiers are slash-delimited paths (`/regression/feature/test`)
//! built by appending one segment at a time as suites and tests nest. They are
//! validated at construction so every identifier observed during a run is
//! well-formed: non-empty, rooted, and free of empty segments.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator between identifier segments.
pub const PATH_SEPARATOR: char = '/';

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Identifier validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Segment was empty or whitespace.
    #[error("identifier segment must be non-empty")]
    EmptySegment,
    /// Segment contained the path separator.
    #[error("identifier segment `{0}` must not contain `/`")]
    SeparatorInSegment(String),
    /// Full path did not start with the separator.
    #[error("test identifier `{0}` must start with `/`")]
    NotRooted(String),
}

// ============================================================================
// SECTION: Test Path
// ============================================================================

/// Hierarchical identifier for one executed test or suite.
///
/// # Invariants
/// - Always starts with `/` and contains at least one non-empty segment.
/// - Immutable once built; children are new values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TestPath(String);

impl TestPath {
    /// Creates a root path with a single segment (`/<segment>`).
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when the segment is empty or contains `/`.
    pub fn root(segment: &str) -> Result<Self, IdentifierError> {
        validate_segment(segment)?;
        Ok(Self(format!("{PATH_SEPARATOR}{segment}")))
    }

    /// Returns a new path with `segment` appended.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when the segment is empty or contains `/`.
    pub fn child(&self, segment: &str) -> Result<Self, IdentifierError> {
        validate_segment(segment)?;
        Ok(Self(format!("{}{PATH_SEPARATOR}{segment}", self.0)))
    }

    /// Parses a full identifier such as `/regression/feature/test`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when the value is not rooted or has empty segments.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let Some(rest) = value.strip_prefix(PATH_SEPARATOR) else {
            return Err(IdentifierError::NotRooted(value.to_string()));
        };
        for segment in rest.split(PATH_SEPARATOR) {
            validate_segment(segment)?;
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_SEPARATOR).skip(1)
    }

    /// Returns the final segment.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit(PATH_SEPARATOR).next().unwrap_or_default()
    }
}

impl fmt::Display for TestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for TestPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SECTION: Feature Name
// ============================================================================

/// Name of a loadable feature (for example `e2e.test_operator`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureName(String);

impl FeatureName {
    /// Creates a new feature name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FeatureName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FeatureName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates a single path segment.
fn validate_segment(segment: &str) -> Result<(), IdentifierError> {
    if segment.trim().is_empty() {
        return Err(IdentifierError::EmptySegment);
    }
    if segment.contains(PATH_SEPARATOR) {
        return Err(IdentifierError::SeparatorInSegment(segment.to_string()));
    }
    Ok(())
}
