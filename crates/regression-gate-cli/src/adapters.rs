// crates/regression-gate-cli/src/adapters.rs
// ============================================================================
// Module: Command Adapters
// Description: Features and cluster resources backed by external commands.
// Purpose: Let a TOML config drive real test binaries and provisioning tools.
// Dependencies: regression-gate-config, regression-gate-core
// ============================================================================

//! ## Overview
//! [`CommandFeature`] runs one program per feature and records a single test
//! named [`COMMAND_TEST_NAME`] beneath the feature path. [`CommandCluster`]
//! runs provisioning and teardown commands. Child stdout is redirected to
//! stderr so the CLI's own stdout carries only the run report.
//!
//! Security posture: commands come from the config file and run with the
//! caller's privileges; no shell is involved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;

use regression_gate_config::ClusterResourceConfig;
use regression_gate_config::FeatureCommandConfig;
use regression_gate_core::ClusterHandle;
use regression_gate_core::ClusterProvider;
use regression_gate_core::Feature;
use regression_gate_core::FeatureError;
use regression_gate_core::FeatureScope;
use regression_gate_core::OutcomeKind;
use regression_gate_core::ProvisionError;
use regression_gate_core::ReleaseError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Test name recorded for a command-backed feature.
pub const COMMAND_TEST_NAME: &str = "command";
/// Environment variable carrying the run mode (`1` native, `0` cluster).
pub const NATIVE_ENV: &str = "REGRESSION_GATE_NATIVE";
/// Environment variable carrying the feature's suite path.
pub const SUITE_PATH_ENV: &str = "REGRESSION_GATE_SUITE_PATH";
/// Environment variable carrying the cluster handle on release.
pub const CLUSTER_HANDLE_ENV: &str = "REGRESSION_GATE_CLUSTER_HANDLE";

// ============================================================================
// SECTION: Command Feature
// ============================================================================

/// Feature that runs an external command.
#[derive(Debug, Clone)]
pub struct CommandFeature {
    /// Program and arguments.
    command: Vec<String>,
    /// Optional working directory.
    cwd: Option<PathBuf>,
}

impl CommandFeature {
    /// Creates a feature from a program-plus-arguments list.
    #[must_use]
    pub const fn new(command: Vec<String>) -> Self {
        Self {
            command,
            cwd: None,
        }
    }

    /// Creates a feature from its config entry.
    #[must_use]
    pub fn from_config(config: &FeatureCommandConfig) -> Self {
        Self {
            command: config.command.clone(),
            cwd: config.cwd.clone(),
        }
    }
}

impl Feature for CommandFeature {
    fn run(&self, scope: &mut FeatureScope<'_>) -> Result<(), FeatureError> {
        let native = if scope.native() { "1" } else { "0" };
        let suite_path = scope.path().to_string();
        let status = build_command(&self.command).and_then(|mut command| {
            command.env(NATIVE_ENV, native).env(SUITE_PATH_ENV, &suite_path);
            if let Some(cwd) = &self.cwd {
                command.current_dir(cwd);
            }
            command.status()
        });
        match status {
            Ok(status) if status.success() => {
                scope.record(COMMAND_TEST_NAME, OutcomeKind::Ok, None)?;
            }
            Ok(status) => {
                scope.record(COMMAND_TEST_NAME, OutcomeKind::Fail, Some(describe_exit(status)))?;
            }
            Err(err) => {
                let detail = format!("failed to spawn `{}`: {err}", self.command.join(" "));
                scope.record(COMMAND_TEST_NAME, OutcomeKind::Error, Some(detail))?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Command Cluster
// ============================================================================

/// Cluster resource provisioned and torn down by external commands.
#[derive(Debug, Clone)]
pub struct CommandCluster {
    /// Resource name.
    name: String,
    /// Provisioning command.
    acquire: Vec<String>,
    /// Teardown command.
    release: Vec<String>,
}

impl CommandCluster {
    /// Creates a resource from explicit commands.
    #[must_use]
    pub fn new(name: impl Into<String>, acquire: Vec<String>, release: Vec<String>) -> Self {
        Self {
            name: name.into(),
            acquire,
            release,
        }
    }

    /// Creates a resource from its config entry.
    #[must_use]
    pub fn from_config(config: &ClusterResourceConfig) -> Self {
        Self::new(config.name.clone(), config.acquire.clone(), config.release.clone())
    }
}

impl ClusterProvider for CommandCluster {
    fn name(&self) -> &str {
        &self.name
    }

    fn acquire(&self) -> Result<ClusterHandle, ProvisionError> {
        run_to_success(&self.acquire, None)
            .map_err(|message| ProvisionError::new(&self.name, message))?;
        Ok(ClusterHandle::new(self.name.clone()))
    }

    fn release(&self, handle: ClusterHandle) -> Result<(), ReleaseError> {
        run_to_success(&self.release, Some(handle.id()))
            .map_err(|message| ReleaseError::new(&self.name, message))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a command with stdin closed and stdout redirected to stderr.
fn build_command(argv: &[String]) -> io::Result<Command> {
    let Some((program, args)) = argv.split_first() else {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
    };
    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null()).stdout(Stdio::from(io::stderr()));
    Ok(command)
}

/// Runs a command and maps spawn failures and non-zero exits to a message.
fn run_to_success(argv: &[String], handle: Option<&str>) -> Result<(), String> {
    let mut command = build_command(argv).map_err(|err| err.to_string())?;
    if let Some(handle) = handle {
        command.env(CLUSTER_HANDLE_ENV, handle);
    }
    let status =
        command.status().map_err(|err| format!("failed to spawn `{}`: {err}", argv.join(" ")))?;
    if status.success() { Ok(()) } else { Err(describe_exit(status)) }
}

/// Describes a non-successful exit status.
fn describe_exit(status: ExitStatus) -> String {
    status.code().map_or_else(
        || "command terminated by signal".to_string(),
        |code| format!("command exited with status {code}"),
    )
}
