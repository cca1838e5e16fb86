// crates/regression-gate-config/src/config.rs
// ============================================================================
// Module: Regression Gate Configuration
// Description: Configuration loading and validation for regression runs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: regression-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The `[expected_failures]` table keeps declaration order, since registry
//! lookups return entries in that order. Missing or invalid configuration
//! fails closed before any cluster is provisioned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use regression_gate_core::ExpectationRegistry;
use regression_gate_core::ExpectedOutcome;
use regression_gate_core::FeatureName;
use regression_gate_core::OutcomeKind;
use regression_gate_core::SuiteDeclaration;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "regression-gate.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "REGRESSION_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of features in a suite declaration.
pub(crate) const MAX_SUITE_FEATURES: usize = 256;
/// Maximum number of expected-failure patterns.
pub(crate) const MAX_EXPECTED_FAILURE_PATTERNS: usize = 4096;
/// Maximum length of an expected-failure pattern.
pub(crate) const MAX_PATTERN_LENGTH: usize = 1024;
/// Maximum length of an expected-failure reason.
pub(crate) const MAX_REASON_LENGTH: usize = 1024;
/// Maximum number of arguments in a configured command.
pub(crate) const MAX_COMMAND_ARGS: usize = 64;
/// Maximum number of cluster resources.
pub(crate) const MAX_CLUSTER_RESOURCES: usize = 16;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Regression gate configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegressionGateConfig {
    /// Run mode and event logging.
    #[serde(default)]
    pub run: RunConfig,
    /// Suite declaration.
    pub suite: SuiteConfig,
    /// Expected failures keyed by pattern, in declaration order.
    #[serde(default)]
    pub expected_failures: toml::Table,
    /// Command-backed feature definitions.
    #[serde(default)]
    pub features: Vec<FeatureCommandConfig>,
    /// Cluster resources wrapped around non-native runs.
    #[serde(default)]
    pub cluster: ClusterConfig,
}

impl RegressionGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config = Self::from_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration text without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the TOML is malformed.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.run.validate()?;
        self.suite.validate()?;
        self.declaration()?;
        self.registry()?;
        let mut names = BTreeSet::new();
        for feature in &self.features {
            feature.validate()?;
            if !names.insert(feature.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "feature `{}` has more than one command entry",
                    feature.name
                )));
            }
        }
        for feature in &self.suite.features {
            if !names.contains(feature.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "suite feature `{feature}` has no [[features]] command entry"
                )));
            }
        }
        self.cluster.validate()
    }

    /// Checks that a run in the given mode can start.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a non-native run without cluster
    /// resources.
    pub fn ensure_runnable(&self, native: bool) -> Result<(), ConfigError> {
        if !native && self.cluster.resources.is_empty() {
            return Err(ConfigError::Invalid(
                "non-native runs require at least one [[cluster.resources]] entry".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the run mode after applying a command-line override.
    #[must_use]
    pub const fn effective_native(&self, native_flag: bool) -> bool {
        native_flag || self.run.native
    }

    /// Builds the suite declaration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the declaration is malformed.
    pub fn declaration(&self) -> Result<SuiteDeclaration, ConfigError> {
        SuiteDeclaration::new(&self.suite.name, self.suite.features.iter().cloned())
            .map_err(|err| ConfigError::Invalid(format!("suite: {err}")))
    }

    /// Builds the expected-failure registry in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for malformed entries or unknown
    /// outcome kinds.
    pub fn registry(&self) -> Result<ExpectationRegistry, ConfigError> {
        if self.expected_failures.len() > MAX_EXPECTED_FAILURE_PATTERNS {
            return Err(ConfigError::Invalid("too many expected_failures patterns".to_string()));
        }
        let mut entries = Vec::with_capacity(self.expected_failures.len());
        for (pattern, value) in &self.expected_failures {
            if pattern.len() > MAX_PATTERN_LENGTH {
                return Err(ConfigError::Invalid(format!(
                    "expected_failures pattern `{pattern}` exceeds max length"
                )));
            }
            let spec: ExpectedFailureSpec = value.clone().try_into().map_err(|err| {
                ConfigError::Invalid(format!("expected_failures `{pattern}`: {err}"))
            })?;
            let outcomes = spec
                .into_entries()
                .into_iter()
                .map(|entry| entry.into_outcome(pattern))
                .collect::<Result<Vec<_>, _>>()?;
            entries.push((pattern.clone(), outcomes));
        }
        ExpectationRegistry::from_entries(entries).map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    /// Returns the command entry for a feature.
    #[must_use]
    pub fn feature_command(&self, name: &FeatureName) -> Option<&FeatureCommandConfig> {
        self.features.iter().find(|feature| feature.name == name.as_str())
    }
}

/// Run mode and event logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    /// Default run mode; the CLI `--native` flag can only turn it on.
    #[serde(default)]
    pub native: bool,
    /// Run event destination.
    #[serde(default)]
    pub events: EventSinkKind,
    /// Event log path when `events = "file"`.
    #[serde(default)]
    pub event_log: Option<PathBuf>,
}

impl RunConfig {
    /// Validates run configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.events, &self.event_log) {
            (EventSinkKind::File, None) => Err(ConfigError::Invalid(
                "run.event_log must be set when run.events = \"file\"".to_string(),
            )),
            (EventSinkKind::File, Some(path)) => {
                validate_path_string("run.event_log", &path.to_string_lossy())
            }
            (_, Some(_)) => Err(ConfigError::Invalid(
                "run.event_log requires run.events = \"file\"".to_string(),
            )),
            (_, None) => Ok(()),
        }
    }
}

/// Run event destinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSinkKind {
    /// Discard events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `run.event_log`.
    File,
}

/// Suite declaration configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SuiteConfig {
    /// Suite name; the root segment of every test path.
    pub name: String,
    /// Feature names in run order.
    pub features: Vec<FeatureName>,
}

impl SuiteConfig {
    /// Validates suite configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("suite.name must be non-empty".to_string()));
        }
        if self.features.is_empty() {
            return Err(ConfigError::Invalid("suite.features must be non-empty".to_string()));
        }
        if self.features.len() > MAX_SUITE_FEATURES {
            return Err(ConfigError::Invalid("suite.features exceeds max entries".to_string()));
        }
        Ok(())
    }
}

/// Command-backed feature definition.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCommandConfig {
    /// Feature name referenced by `suite.features`.
    pub name: String,
    /// Program and arguments.
    pub command: Vec<String>,
    /// Optional working directory for the command.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

impl FeatureCommandConfig {
    /// Validates a feature command entry.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("feature name is empty".to_string()));
        }
        validate_command(&format!("features.{}.command", self.name), &self.command)?;
        if let Some(cwd) = &self.cwd {
            validate_path_string(&format!("features.{}.cwd", self.name), &cwd.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Cluster configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterConfig {
    /// Resources in acquisition order; released in reverse.
    #[serde(default)]
    pub resources: Vec<ClusterResourceConfig>,
}

impl ClusterConfig {
    /// Validates cluster configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.resources.len() > MAX_CLUSTER_RESOURCES {
            return Err(ConfigError::Invalid("cluster.resources exceeds max entries".to_string()));
        }
        let mut names = BTreeSet::new();
        for resource in &self.resources {
            resource.validate()?;
            if !names.insert(resource.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "cluster resource `{}` is declared more than once",
                    resource.name
                )));
            }
        }
        Ok(())
    }
}

/// Command-backed cluster resource.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterResourceConfig {
    /// Resource name used in logs and errors.
    pub name: String,
    /// Command that provisions the resource.
    pub acquire: Vec<String>,
    /// Command that tears the resource down.
    pub release: Vec<String>,
}

impl ClusterResourceConfig {
    /// Validates a cluster resource entry.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("cluster resource name is empty".to_string()));
        }
        validate_command(&format!("cluster.{}.acquire", self.name), &self.acquire)?;
        validate_command(&format!("cluster.{}.release", self.name), &self.release)
    }
}

// ============================================================================
// SECTION: Expected Failure Entries
// ============================================================================

/// Value of one `[expected_failures]` key: one entry or an ordered list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpectedFailureSpec {
    /// Single inline entry.
    One(ExpectedFailureEntry),
    /// Ordered entries.
    Many(Vec<ExpectedFailureEntry>),
}

impl ExpectedFailureSpec {
    /// Flattens the value into its ordered entries.
    fn into_entries(self) -> Vec<ExpectedFailureEntry> {
        match self {
            Self::One(entry) => vec![entry],
            Self::Many(entries) => entries,
        }
    }
}

/// Raw `{ kind, reason }` entry.
#[derive(Debug, Deserialize)]
struct ExpectedFailureEntry {
    /// Outcome kind name.
    kind: String,
    /// Reason shown with the expected outcome.
    reason: String,
}

impl ExpectedFailureEntry {
    /// Converts the entry, rejecting unknown kinds and oversized reasons.
    fn into_outcome(self, pattern: &str) -> Result<ExpectedOutcome, ConfigError> {
        let kind: OutcomeKind = self.kind.parse().map_err(|err| {
            ConfigError::Invalid(format!("expected_failures `{pattern}`: {err}"))
        })?;
        if self.reason.len() > MAX_REASON_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "expected_failures `{pattern}`: reason exceeds max length"
            )));
        }
        Ok(ExpectedOutcome::new(kind, self.reason))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a program-plus-arguments command.
fn validate_command(field: &str, command: &[String]) -> Result<(), ConfigError> {
    let Some(program) = command.first() else {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    };
    if program.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} program must be non-empty")));
    }
    if command.len() > MAX_COMMAND_ARGS {
        return Err(ConfigError::Invalid(format!("{field} exceeds max arguments")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
