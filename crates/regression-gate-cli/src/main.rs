// crates/regression-gate-cli/src/main.rs
// ============================================================================
// Module: Regression Gate CLI Entry Point
// Description: Command dispatcher for regression runs and config tooling.
// Purpose: Run a configured suite and inspect its expected failures.
// Dependencies: clap, regression-gate-cli, regression-gate-config, regression-gate-core, serde
// ============================================================================

//! ## Overview
//! The regression gate CLI loads `regression-gate.toml`, runs the declared
//! suite against a provisioned cluster or a native target, and prints the run
//! summary. It exits non-zero on any regression or fatal error. All
//! user-facing strings are routed through the message catalog.
//!
//! Security posture: inputs are untrusted and must be validated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use regression_gate_cli::t;
use regression_gate_cli::wiring::catalog_from_config;
use regression_gate_cli::wiring::clusters_from_config;
use regression_gate_cli::wiring::event_sink_from_config;
use regression_gate_config::RegressionGateConfig;
use regression_gate_core::ClusterProvider;
use regression_gate_core::ExpectedOutcome;
use regression_gate_core::OutcomeKind;
use regression_gate_core::Orchestrator;
use regression_gate_core::Pattern;
use regression_gate_core::RunReport;
use regression_gate_core::RunStatus;
use regression_gate_core::TestPath;
use regression_gate_core::Verdict;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "regression-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the configured regression suite.
    Run(RunCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Expected-failure inspection utilities.
    Expectations {
        /// Selected expectations subcommand.
        #[command(subcommand)]
        command: ExpectationsCommand,
    },
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Config file path (defaults to `REGRESSION_GATE_CONFIG` or `regression-gate.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Run against a pre-existing local target instead of a provisioned cluster.
    #[arg(long, action = ArgAction::SetTrue)]
    native: bool,
    /// Summary output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a config file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Validate for a native run, as `run --native` would.
    #[arg(long, action = ArgAction::SetTrue)]
    native: bool,
}

/// Expectations subcommands.
#[derive(Subcommand, Debug)]
enum ExpectationsCommand {
    /// Show the expected failures covering a test identifier.
    Lookup(ExpectationsLookupCommand),
}

/// Arguments for `expectations lookup`.
#[derive(Args, Debug)]
struct ExpectationsLookupCommand {
    /// Config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Full test identifier, e.g. `/regression/e2e.test_operator/test_003`.
    #[arg(value_name = "IDENTIFIER")]
    identifier: String,
    /// Observed outcome to resolve into a verdict.
    #[arg(long, value_name = "KIND")]
    outcome: Option<OutcomeKind>,
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Output formats.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

/// JSON body for `expectations lookup`.
#[derive(Debug, Serialize)]
struct LookupOutput<'a> {
    /// Identifier that was looked up.
    identifier: &'a str,
    /// Matching patterns in declaration order.
    patterns: Vec<&'a Pattern>,
    /// Expected outcomes of every matching pattern, in declaration order.
    expected: Vec<&'a ExpectedOutcome>,
    /// Verdict for `--outcome`, when given.
    verdict: Option<Verdict>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Run(command) => command_run(&command),
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Expectations {
            command,
        } => command_expectations(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stdout_line(help.trim_end()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the run command.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let native = config.effective_native(command.native);
    config
        .ensure_runnable(native)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let registry =
        config.registry().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let declaration =
        config.declaration().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let catalog = catalog_from_config(&config)
        .map_err(|err| CliError::new(t!("run.setup_failed", error = err)))?;
    let clusters = clusters_from_config(&config);
    let events = event_sink_from_config(&config.run).map_err(|err| {
        let path = config.run.event_log.as_deref().map(|path| path.display().to_string());
        CliError::new(t!("run.event_log_failed", path = path.unwrap_or_default(), error = err))
    })?;

    let orchestrator = clusters.iter().fold(
        Orchestrator::new(&declaration, &catalog, &registry, events.as_ref()),
        |orchestrator, cluster| orchestrator.with_cluster_resource(cluster as &dyn ClusterProvider),
    );
    let report = match orchestrator.run(native) {
        Ok(report) => report,
        Err(err) => {
            if let Some(partial) = err.partial_report() {
                write_report(partial, command.format)?;
            }
            return Err(CliError::new(t!("run.failed", error = err)));
        }
    };
    write_report(&report, command.format)?;
    Ok(match report.status() {
        RunStatus::Passed => ExitCode::SUCCESS,
        RunStatus::Failed => ExitCode::FAILURE,
    })
}

/// Writes the run summary in the requested format.
fn write_report(report: &RunReport, format: OutputFormat) -> CliResult<()> {
    let rendered = match format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|err| CliError::new(t!("run.serialize_failed", error = err)))?,
    };
    write_stdout_line(rendered.trim_end())
        .map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    config
        .ensure_runnable(config.effective_native(command.native))
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Expectations Commands
// ============================================================================

/// Dispatches expectations subcommands.
fn command_expectations(command: ExpectationsCommand) -> CliResult<ExitCode> {
    match command {
        ExpectationsCommand::Lookup(command) => command_expectations_lookup(&command),
    }
}

/// Executes the expectations lookup command.
fn command_expectations_lookup(command: &ExpectationsLookupCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let registry =
        config.registry().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let identifier = TestPath::parse(&command.identifier).map_err(|err| {
        CliError::new(t!(
            "expectations.identifier_invalid",
            identifier = command.identifier,
            error = err
        ))
    })?;
    let output = LookupOutput {
        identifier: identifier.as_str(),
        patterns: registry.matching_patterns(identifier.as_str()),
        expected: registry.lookup(identifier.as_str()),
        verdict: command.outcome.map(|kind| registry.resolve(identifier.as_str(), kind)),
    };
    match command.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|err| CliError::new(t!("expectations.serialize_failed", error = err)))?;
            write_stdout_line(&json).map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        OutputFormat::Text => write_lookup_text(&output, command.outcome)?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Renders lookup output as text.
fn write_lookup_text(output: &LookupOutput<'_>, outcome: Option<OutcomeKind>) -> CliResult<()> {
    let mut lines = Vec::new();
    if output.patterns.is_empty() {
        lines.push(t!("expectations.none", identifier = output.identifier));
    }
    for pattern in &output.patterns {
        lines.push(t!("expectations.pattern", pattern = pattern));
    }
    for entry in &output.expected {
        lines.push(t!("expectations.entry", kind = entry.kind, reason = entry.reason));
    }
    if let (Some(kind), Some(verdict)) = (outcome, &output.verdict) {
        let line = match verdict {
            Verdict::Expected {
                reason,
            } => t!(
                "expectations.verdict_reason",
                kind = kind,
                verdict = verdict.label(),
                reason = reason
            ),
            _ => t!("expectations.verdict", kind = kind, verdict = verdict.label()),
        };
        lines.push(line);
    }
    write_stdout_line(&lines.join("\n")).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Config Helpers
// ============================================================================

/// Loads and validates configuration.
fn load_config(path: Option<&Path>) -> CliResult<RegressionGateConfig> {
    RegressionGateConfig::load(path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
