// crates/regression-gate-config/src/lib.rs
// ============================================================================
// Module: Regression Gate Config Library
// Description: Run configuration model and fail-closed validation.
// Purpose: Single source of truth for regression-gate.toml semantics.
// Dependencies: regression-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `regression-gate-config` defines the TOML configuration for a regression
//! run: the suite declaration, the expected-failure table, and the
//! command-backed features and cluster resources used by the CLI. Validation
//! is strict and fails closed.
//!
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ClusterConfig;
pub use config::ClusterResourceConfig;
pub use config::ConfigError;
pub use config::EventSinkKind;
pub use config::FeatureCommandConfig;
pub use config::RegressionGateConfig;
pub use config::RunConfig;
pub use config::SuiteConfig;
