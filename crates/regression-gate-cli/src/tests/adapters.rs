// crates/regression-gate-cli/src/tests/adapters.rs
// ============================================================================
// Module: Command Adapter Tests
// Description: Unit tests for command-backed features and cluster resources.
// Purpose: Ensure exit statuses map to outcomes and release sees its handle.
// Dependencies: regression-gate-cli adapters, regression-gate-core
// ============================================================================

//! ## Overview
//! Runs small shell commands through [`CommandFeature`] and
//! [`CommandCluster`] and checks the recorded outcomes.

#![cfg(unix)]

use regression_gate_core::ClusterProvider;
use regression_gate_core::ExpectationRegistry;
use regression_gate_core::FeatureCatalog;
use regression_gate_core::NoopEventSink;
use regression_gate_core::OutcomeKind;
use regression_gate_core::Orchestrator;
use regression_gate_core::RunReport;
use regression_gate_core::RunStatus;
use regression_gate_core::SuiteDeclaration;
use regression_gate_core::Verdict;

use crate::adapters::CommandCluster;
use crate::adapters::CommandFeature;

/// Converts string slices into an owned argv.
fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| (*part).to_string()).collect()
}

/// Runs a one-feature suite backed by `command`.
fn run_single(command: &[&str], native: bool) -> RunReport {
    let mut catalog = FeatureCatalog::new();
    catalog.register("feat", CommandFeature::new(argv(command))).unwrap();
    let declaration = SuiteDeclaration::new("suite", ["feat"]).unwrap();
    let registry = ExpectationRegistry::empty();
    let cluster = CommandCluster::new("local", argv(&["true"]), argv(&["true"]));
    Orchestrator::new(&declaration, &catalog, &registry, &NoopEventSink)
        .with_cluster_resource(&cluster)
        .run(native)
        .unwrap()
}

#[test]
fn zero_exit_records_ok() {
    let report = run_single(&["true"], true);
    let record = report.record("/suite/feat/command").unwrap();
    assert_eq!(record.observed, OutcomeKind::Ok);
    assert_eq!(record.verdict, Verdict::Passed);
    assert_eq!(report.status(), RunStatus::Passed);
}

#[test]
fn non_zero_exit_records_failure() {
    let report = run_single(&["sh", "-c", "exit 3"], true);
    let record = report.record("/suite/feat/command").unwrap();
    assert_eq!(record.observed, OutcomeKind::Fail);
    assert_eq!(record.verdict, Verdict::Regression);
    assert!(record.detail.as_deref().unwrap().contains("status 3"));
    assert_eq!(report.status(), RunStatus::Failed);
}

#[test]
fn missing_program_records_error() {
    let report = run_single(&["regression-gate-no-such-program"], true);
    let record = report.record("/suite/feat/command").unwrap();
    assert_eq!(record.observed, OutcomeKind::Error);
    assert!(record.detail.as_deref().unwrap().contains("failed to spawn"));
}

#[test]
fn feature_sees_run_mode_and_suite_path() {
    let check = "test \"$REGRESSION_GATE_NATIVE\" = 0 && \
                 test \"$REGRESSION_GATE_SUITE_PATH\" = /suite/feat";
    let report = run_single(&["sh", "-c", check], false);
    assert_eq!(report.status(), RunStatus::Passed);
    assert!(!report.native());
}

#[test]
fn cluster_release_receives_handle() {
    let cluster = CommandCluster::new(
        "kind",
        argv(&["true"]),
        argv(&["sh", "-c", "test \"$REGRESSION_GATE_CLUSTER_HANDLE\" = kind"]),
    );
    let handle = cluster.acquire().unwrap();
    assert_eq!(handle.id(), "kind");
    cluster.release(handle).unwrap();
}

#[test]
fn cluster_acquire_failure_names_exit_status() {
    let cluster = CommandCluster::new("kind", argv(&["sh", "-c", "exit 7"]), argv(&["true"]));
    let err = cluster.acquire().unwrap_err();
    assert!(err.to_string().contains("status 7"), "{err}");
}

#[test]
fn empty_cluster_command_is_rejected() {
    let cluster = CommandCluster::new("kind", Vec::new(), argv(&["true"]));
    assert!(cluster.acquire().is_err());
}
