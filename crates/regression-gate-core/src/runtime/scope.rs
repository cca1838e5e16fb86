// crates/regression-gate-core/src/runtime/scope.rs
// ============================================================================
// Module: Run-Mode Resource Scope
// Description: Acquire/run/release wrapper selected by the native flag.
// Purpose: Guarantee cluster teardown on every exit path of a non-native run.
// Dependencies: crate::interfaces, crate::runtime::{events, orchestrator}, serde
// ============================================================================

//! ## Overview
//! Native runs execute the body directly. Non-native runs acquire each
//! cluster resource in declared order, run the body, then release in exact
//! reverse order. Release is driven by a guard, so it also runs while a
//! panic unwinds out of the body.
//!
//! State machine:
//! `NotStarted -> RunningDirect -> Done` (native) or
//! `NotStarted -> Acquiring -> Running -> Releasing -> Done`. A failed
//! acquisition moves from `Acquiring` straight to `Releasing` so that
//! resources acquired before it are returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::Cell;

use serde::Serialize;

use crate::interfaces::ClusterHandle;
use crate::interfaces::ClusterProvider;
use crate::interfaces::ReleaseError;
use crate::runtime::events::RunEventKind;
use crate::runtime::events::RunEventSink;
use crate::runtime::orchestrator::RunError;

// ============================================================================
// SECTION: State
// ============================================================================

/// Lifecycle state of a resource scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeState {
    /// Scope has not executed.
    NotStarted,
    /// Native run executing without acquisition.
    RunningDirect,
    /// Cluster resources being acquired.
    Acquiring,
    /// Body executing with resources held.
    Running,
    /// Held resources being released.
    Releasing,
    /// Terminal state.
    Done,
}

// ============================================================================
// SECTION: Resource Scope
// ============================================================================

/// Run-mode resource scope for one run.
pub struct ResourceScope<'a> {
    /// True when no resource should be acquired.
    native: bool,
    /// Resources in acquisition order.
    resources: Vec<&'a dyn ClusterProvider>,
    /// Event sink for transitions and resource events.
    events: &'a dyn RunEventSink,
    /// Current lifecycle state.
    state: Cell<ScopeState>,
}

impl<'a> ResourceScope<'a> {
    /// Creates a scope for the given run mode.
    #[must_use]
    pub const fn new(native: bool, events: &'a dyn RunEventSink) -> Self {
        Self {
            native,
            resources: Vec::new(),
            events,
            state: Cell::new(ScopeState::NotStarted),
        }
    }

    /// Adds a cluster resource; resources are acquired in the order added.
    #[must_use]
    pub fn with_resource(mut self, resource: &'a dyn ClusterProvider) -> Self {
        self.resources.push(resource);
        self
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> ScopeState {
        self.state.get()
    }

    /// Executes `body` inside the scope.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Provision`] when acquisition fails (the body never
    /// runs), the body's own error, or [`RunError::Release`] when the body
    /// succeeded but teardown failed. A non-native scope without resources
    /// returns [`RunError::Configuration`] before the body runs. A scope
    /// executes at most once.
    pub fn execute<T, F>(&self, body: F) -> Result<T, RunError>
    where
        F: FnOnce() -> Result<T, RunError>,
    {
        if self.state.get() != ScopeState::NotStarted {
            return Err(RunError::Configuration("resource scope already executed".to_string()));
        }
        if !self.native && self.resources.is_empty() {
            return Err(RunError::Configuration(
                "non-native runs require at least one cluster resource".to_string(),
            ));
        }
        if self.native {
            self.transition(ScopeState::RunningDirect);
            let result = body();
            self.transition(ScopeState::Done);
            return result;
        }

        self.transition(ScopeState::Acquiring);
        let mut guard = ReleaseGuard::new(self.events);
        for resource in self.resources.iter().copied() {
            match resource.acquire() {
                Ok(handle) => {
                    self.events.emit(RunEventKind::ResourceAcquired {
                        resource: resource.name().to_string(),
                        handle: handle.id().to_string(),
                    });
                    guard.hold(resource, handle);
                }
                Err(err) => {
                    self.transition(ScopeState::Releasing);
                    let _ = guard.release_all();
                    self.transition(ScopeState::Done);
                    return Err(RunError::Provision(err));
                }
            }
        }

        self.transition(ScopeState::Running);
        let result = body();
        self.transition(ScopeState::Releasing);
        let released = guard.release_all();
        self.transition(ScopeState::Done);
        match (result, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(RunError::Release(err)),
            (Err(err), _) => Err(err),
        }
    }

    /// Moves to `next` and records the transition.
    fn transition(&self, next: ScopeState) {
        let from = self.state.replace(next);
        self.events.emit(RunEventKind::ScopeTransition {
            from,
            to: next,
        });
    }
}

// ============================================================================
// SECTION: Release Guard
// ============================================================================

/// Holds acquired resources and releases them in reverse order.
struct ReleaseGuard<'a> {
    /// Acquired resources with their handles, in acquisition order.
    held: Vec<(&'a dyn ClusterProvider, ClusterHandle)>,
    /// Event sink for release events.
    events: &'a dyn RunEventSink,
}

impl<'a> ReleaseGuard<'a> {
    /// Creates an empty guard.
    const fn new(events: &'a dyn RunEventSink) -> Self {
        Self {
            held: Vec::new(),
            events,
        }
    }

    /// Tracks an acquired resource.
    fn hold(&mut self, resource: &'a dyn ClusterProvider, handle: ClusterHandle) {
        self.held.push((resource, handle));
    }

    /// Releases every held resource, newest first.
    ///
    /// Every resource is released even when an earlier release fails; the
    /// first failure is returned.
    fn release_all(&mut self) -> Result<(), ReleaseError> {
        let mut first_error = None;
        while let Some((resource, handle)) = self.held.pop() {
            let handle_id = handle.id().to_string();
            match resource.release(handle) {
                Ok(()) => self.events.emit(RunEventKind::ResourceReleased {
                    resource: resource.name().to_string(),
                    handle: handle_id,
                }),
                Err(err) => {
                    self.events.emit(RunEventKind::ResourceReleaseFailed {
                        resource: resource.name().to_string(),
                        error: err.to_string(),
                    });
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        if !self.held.is_empty() {
            let _ = self.release_all();
        }
    }
}
