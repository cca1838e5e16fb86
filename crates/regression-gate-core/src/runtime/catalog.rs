// crates/regression-gate-core/src/runtime/catalog.rs
// ============================================================================
// Module: Regression Gate Feature Catalog
// Description: Explicit name -> feature registration and lookup.
// Purpose: Resolve declared feature names to runnable units.
// Dependencies: crate::core, crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! Features are registered by name during start-up. Loading a name that was
//! never registered is a configuration error for the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::identifiers::FeatureName;
use crate::interfaces::Feature;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Feature catalog errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Declared feature has no registration.
    #[error("feature `{0}` is not registered")]
    NotFound(FeatureName),
    /// Feature registered twice.
    #[error("feature `{0}` is already registered")]
    Duplicate(FeatureName),
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Registered features keyed by name.
#[derive(Default)]
pub struct FeatureCatalog {
    /// Registered features.
    features: BTreeMap<FeatureName, Box<dyn Feature>>,
}

impl FeatureCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a feature under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Duplicate`] when the name is already registered.
    pub fn register(
        &mut self,
        name: impl Into<FeatureName>,
        feature: impl Feature + 'static,
    ) -> Result<(), LoadError> {
        let name = name.into();
        if self.features.contains_key(&name) {
            return Err(LoadError::Duplicate(name));
        }
        self.features.insert(name, Box::new(feature));
        Ok(())
    }

    /// Resolves a feature by name.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] when the name is not registered.
    pub fn load(&self, name: &FeatureName) -> Result<&dyn Feature, LoadError> {
        self.features
            .get(name)
            .map(|feature| &**feature)
            .ok_or_else(|| LoadError::NotFound(name.clone()))
    }

    /// Returns true when a feature is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &FeatureName) -> bool {
        self.features.contains_key(name)
    }

    /// Returns registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &FeatureName> {
        self.features.keys()
    }
}
