// crates/regression-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Regression Gate Runtime
// Description: Orchestrator, suite composition, resource scope, and events.
// Purpose: Execute a declared suite against the expected-failure registry.
// Dependencies: crate::{core, interfaces}, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Runtime modules run a suite: the orchestrator enters the resource scope,
//! the composition runs features in order, and every recorded test is
//! resolved against the registry through the run context. Execution is
//! synchronous and sequential.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catalog;
pub mod composition;
pub mod context;
pub mod events;
pub mod orchestrator;
pub mod scope;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::FeatureCatalog;
pub use catalog::LoadError;
pub use composition::DeclarationError;
pub use composition::SuiteComposition;
pub use composition::SuiteDeclaration;
pub use context::FeatureScope;
pub use context::RunContext;
pub use events::FanoutEventSink;
pub use events::FileEventSink;
pub use events::MemoryEventSink;
pub use events::NoopEventSink;
pub use events::RunEvent;
pub use events::RunEventKind;
pub use events::RunEventSink;
pub use events::StderrEventSink;
pub use orchestrator::Orchestrator;
pub use orchestrator::RunError;
pub use scope::ResourceScope;
pub use scope::ScopeState;
