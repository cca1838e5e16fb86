// crates/regression-gate-core/tests/support/mod.rs
// ============================================================================
// Module: Regression Gate Test Support
// Description: Scripted cluster resources and feature fixtures.
// Purpose: Share deterministic collaborators across runtime tests.
// ============================================================================

//! Shared fixtures for runtime integration tests.

#![allow(dead_code, reason = "Not every test binary uses every fixture.")]

use std::cell::RefCell;
use std::rc::Rc;

use regression_gate_core::ClusterHandle;
use regression_gate_core::ClusterProvider;
use regression_gate_core::ExpectationRegistry;
use regression_gate_core::ExpectedOutcome;
use regression_gate_core::FeatureCatalog;
use regression_gate_core::FeatureError;
use regression_gate_core::ProvisionError;
use regression_gate_core::ReleaseError;
use regression_gate_core::TestFailure;
use regression_gate_core::feature_fn;

/// Ordered log of collaborator calls shared between fixtures.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<String>>>,
}

impl CallLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call.
    pub fn push(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    /// Returns the calls in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Counts occurrences of an exact call.
    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|entry| entry.as_str() == call).count()
    }
}

/// Cluster resource whose acquire/release results are scripted.
pub struct ScriptedCluster {
    name: String,
    fail_acquire: bool,
    fail_release: bool,
    log: CallLog,
}

impl ScriptedCluster {
    /// Resource that acquires and releases cleanly.
    pub fn healthy(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            fail_acquire: false,
            fail_release: false,
            log: log.clone(),
        }
    }

    /// Resource whose acquisition fails.
    pub fn failing_acquire(name: &str, log: &CallLog) -> Self {
        Self {
            fail_acquire: true,
            ..Self::healthy(name, log)
        }
    }

    /// Resource whose release fails.
    pub fn failing_release(name: &str, log: &CallLog) -> Self {
        Self {
            fail_release: true,
            ..Self::healthy(name, log)
        }
    }
}

impl ClusterProvider for ScriptedCluster {
    fn name(&self) -> &str {
        &self.name
    }

    fn acquire(&self) -> Result<ClusterHandle, ProvisionError> {
        self.log.push(format!("acquire:{}", self.name));
        if self.fail_acquire {
            return Err(ProvisionError::new(&self.name, "no capacity"));
        }
        Ok(ClusterHandle::new(format!("{}-1", self.name)))
    }

    fn release(&self, handle: ClusterHandle) -> Result<(), ReleaseError> {
        self.log.push(format!("release:{}", self.name));
        if handle.id() != format!("{}-1", self.name) {
            return Err(ReleaseError::new(&self.name, "foreign handle"));
        }
        if self.fail_release {
            return Err(ReleaseError::new(&self.name, "teardown timed out"));
        }
        Ok(())
    }
}

/// Registry with a single flaky pattern under feature `a`.
pub fn flaky_registry() -> ExpectationRegistry {
    ExpectationRegistry::from_entries([("/suite/a/*", vec![ExpectedOutcome::fail("flaky")])])
        .expect("registry")
}

/// Registers a feature whose single test `t1` fails with an assertion.
pub fn register_failing(catalog: &mut FeatureCatalog, name: &str, log: &CallLog) {
    let log = log.clone();
    let label = name.to_string();
    catalog
        .register(
            name,
            feature_fn(move |scope| {
                log.push(format!("run:{label}"));
                scope.test("t1", |_| Err(TestFailure::Assertion("boom".to_string())))?;
                Ok(())
            }),
        )
        .expect("register");
}

/// Registers a feature whose single test `t1` passes.
pub fn register_passing(catalog: &mut FeatureCatalog, name: &str, log: &CallLog) {
    let log = log.clone();
    let label = name.to_string();
    catalog
        .register(
            name,
            feature_fn(move |scope| {
                log.push(format!("run:{label}"));
                scope.test("t1", |_| Ok(()))?;
                Ok(())
            }),
        )
        .expect("register");
}

/// Registers a feature that aborts after recording one passing test.
pub fn register_aborting(catalog: &mut FeatureCatalog, name: &str, log: &CallLog) {
    let log = log.clone();
    let label = name.to_string();
    catalog
        .register(
            name,
            feature_fn(move |scope| {
                log.push(format!("run:{label}"));
                scope.test("before_abort", |_| Ok(()))?;
                Err(FeatureError::Aborted("lost connection".to_string()))
            }),
        )
        .expect("register");
}
