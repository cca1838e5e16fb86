// crates/regression-gate-cli/src/lib.rs
// ============================================================================
// Module: Regression Gate CLI Library
// Description: Shared helpers for the regression gate command-line interface.
// Purpose: Provide command adapters, run wiring, and the message catalog.
// Dependencies: regression-gate-config, regression-gate-core
// ============================================================================

//! ## Overview
//! This library houses the pieces the `regression-gate` binary wires
//! together: the message catalog, command-backed features and cluster
//! resources, and the config-to-run builders. Keeping them here lets unit
//! tests exercise them without spawning the binary.
//!
//! Security posture: CLI inputs are untrusted and must be validated.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Command-backed features and cluster resources.
pub mod adapters;
/// Message catalog.
pub mod i18n;
/// Config-to-run builders.
pub mod wiring;
