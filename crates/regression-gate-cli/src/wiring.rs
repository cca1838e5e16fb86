// crates/regression-gate-cli/src/wiring.rs
// ============================================================================
// Module: Run Wiring
// Description: Builds catalog, cluster resources, and event sink from config.
// Purpose: Turn a validated config into the collaborators a run needs.
// Dependencies: regression-gate-config, regression-gate-core
// ============================================================================

//! ## Overview
//! Every `[[features]]` entry becomes a [`CommandFeature`] in the catalog and
//! every `[[cluster.resources]]` entry a [`CommandCluster`], in declared order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;

use regression_gate_config::EventSinkKind;
use regression_gate_config::RegressionGateConfig;
use regression_gate_config::RunConfig;
use regression_gate_core::FeatureCatalog;
use regression_gate_core::FileEventSink;
use regression_gate_core::LoadError;
use regression_gate_core::NoopEventSink;
use regression_gate_core::RunEventSink;
use regression_gate_core::StderrEventSink;

use crate::adapters::CommandCluster;
use crate::adapters::CommandFeature;

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Registers a command-backed feature for every configured entry.
///
/// # Errors
///
/// Returns [`LoadError::Duplicate`] when two entries share a name.
pub fn catalog_from_config(config: &RegressionGateConfig) -> Result<FeatureCatalog, LoadError> {
    let mut catalog = FeatureCatalog::new();
    for feature in &config.features {
        catalog.register(feature.name.as_str(), CommandFeature::from_config(feature))?;
    }
    Ok(catalog)
}

/// Builds command-backed cluster resources in acquisition order.
#[must_use]
pub fn clusters_from_config(config: &RegressionGateConfig) -> Vec<CommandCluster> {
    config.cluster.resources.iter().map(CommandCluster::from_config).collect()
}

/// Opens the configured run event sink.
///
/// # Errors
///
/// Returns an I/O error when the event log cannot be opened.
pub fn event_sink_from_config(run: &RunConfig) -> io::Result<Box<dyn RunEventSink>> {
    match (run.events, &run.event_log) {
        (EventSinkKind::File, Some(path)) => Ok(Box::new(FileEventSink::new(path)?)),
        (EventSinkKind::File, None) => {
            Err(io::Error::new(io::ErrorKind::InvalidInput, "run.event_log is not set"))
        }
        (EventSinkKind::Stderr, _) => Ok(Box::new(StderrEventSink)),
        (EventSinkKind::None, _) => Ok(Box::new(NoopEventSink)),
    }
}
