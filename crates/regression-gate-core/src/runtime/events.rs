// crates/regression-gate-core/src/runtime/events.rs
// ============================================================================
// Module: Regression Gate Run Events
// Description: Structured run events and sinks that record them.
// Purpose: Emit JSON-line run logs without hard logging dependencies.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every state change in a run (scope transitions, resource acquisition,
//! feature boundaries, test verdicts) is emitted as a [`RunEvent`]. Sinks
//! decide where events go; deployments route them to stderr, an append-only
//! file, or discard them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::outcome::OutcomeKind;
use crate::core::outcome::Verdict;
use crate::core::report::RunStatus;
use crate::runtime::scope::ScopeState;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Run event payload with a consistent timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct RunEvent {
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Event body, tagged by `event`.
    #[serde(flatten)]
    pub kind: RunEventKind,
}

impl RunEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn now(kind: RunEventKind) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            timestamp_ms,
            kind,
        }
    }
}

/// Run event bodies.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEventKind {
    /// Orchestrator entered a run.
    RunStarted {
        /// Root suite path.
        suite: String,
        /// Run mode flag.
        native: bool,
        /// Number of declared features.
        features: usize,
        /// Number of expected-failure patterns.
        expectations: usize,
    },
    /// Resource scope changed state.
    ScopeTransition {
        /// Previous state.
        from: ScopeState,
        /// New state.
        to: ScopeState,
    },
    /// Cluster resource acquired.
    ResourceAcquired {
        /// Resource name.
        resource: String,
        /// Handle identifier.
        handle: String,
    },
    /// Cluster resource released.
    ResourceReleased {
        /// Resource name.
        resource: String,
        /// Handle identifier.
        handle: String,
    },
    /// Cluster resource teardown failed.
    ResourceReleaseFailed {
        /// Resource name.
        resource: String,
        /// Failure detail.
        error: String,
    },
    /// Feature execution started.
    FeatureStarted {
        /// Feature name.
        feature: String,
        /// Feature suite path.
        path: String,
    },
    /// Feature execution finished.
    FeatureFinished {
        /// Feature name.
        feature: String,
        /// Number of tests recorded.
        tests: usize,
        /// Number of regressions recorded.
        regressions: usize,
        /// True when the feature raised an unrecoverable error.
        aborted: bool,
    },
    /// One test verdict.
    TestResult {
        /// Test identifier.
        path: String,
        /// Observed outcome.
        observed: OutcomeKind,
        /// Verdict after expected-failure resolution.
        verdict: Verdict,
    },
    /// Orchestrator left the run.
    RunFinished {
        /// Final status.
        status: RunStatus,
        /// Fatal error message, if the run aborted.
        error: Option<String>,
    },
}

impl RunEventKind {
    /// Returns the stable event label.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RunStarted {
                ..
            } => "run_started",
            Self::ScopeTransition {
                ..
            } => "scope_transition",
            Self::ResourceAcquired {
                ..
            } => "resource_acquired",
            Self::ResourceReleased {
                ..
            } => "resource_released",
            Self::ResourceReleaseFailed {
                ..
            } => "resource_release_failed",
            Self::FeatureStarted {
                ..
            } => "feature_started",
            Self::FeatureFinished {
                ..
            } => "feature_finished",
            Self::TestResult {
                ..
            } => "test_result",
            Self::RunFinished {
                ..
            } => "run_finished",
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for run events.
pub trait RunEventSink: Send + Sync {
    /// Record an event.
    fn record(&self, event: &RunEvent);

    /// Stamps and records an event body.
    fn emit(&self, kind: RunEventKind) {
        self.record(&RunEvent::now(kind));
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Sink that logs JSON lines to stderr.
pub struct StderrEventSink;

impl RunEventSink for StderrEventSink {
    fn record(&self, event: &RunEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the event log in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RunEventSink for FileEventSink {
    fn record(&self, event: &RunEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op sink.
pub struct NoopEventSink;

impl RunEventSink for NoopEventSink {
    fn record(&self, _event: &RunEvent) {}
}

/// Sink that keeps events in memory.
#[derive(Default)]
pub struct MemoryEventSink {
    /// Recorded events in emission order.
    events: Mutex<Vec<RunEvent>>,
}

impl MemoryEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns the recorded event labels in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .map(|events| events.iter().map(|event| event.kind.name()).collect())
            .unwrap_or_default()
    }
}

impl RunEventSink for MemoryEventSink {
    fn record(&self, event: &RunEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Fans events out to several sinks.
pub struct FanoutEventSink {
    /// Target sinks in order.
    sinks: Vec<Box<dyn RunEventSink>>,
}

impl FanoutEventSink {
    /// Creates a fan-out sink.
    #[must_use]
    pub fn new(sinks: Vec<Box<dyn RunEventSink>>) -> Self {
        Self {
            sinks,
        }
    }
}

impl RunEventSink for FanoutEventSink {
    fn record(&self, event: &RunEvent) {
        for sink in &self.sinks {
            sink.record(event);
        }
    }
}
