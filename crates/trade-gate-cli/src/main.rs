// crates/trade-gate-cli/src/main.rs
// ============================================================================
// Module: Trade Gate CLI Entry Point
// Description: Command dispatcher for the Trade Gate tool server.
// Purpose: Start the server, print the tool catalog, and validate config.
// Dependencies: clap, serde_json, thiserror, tokio, trade-gate-{config,contract,mcp}
// ============================================================================

//! ## Overview
//! The `trade-gate` binary loads configuration, applies command-line
//! overrides, and serves the JSON-RPC tool endpoint over stdio or HTTP.
//! Stdout is reserved for protocol responses while serving; diagnostics go to
//! stderr.
//! Security posture: configuration and fixture paths are operator input and
//! are validated before the server starts.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde_json::json;
use thiserror::Error;
use trade_gate_config::ServerTransport;
use trade_gate_config::TradeGateConfig;
use trade_gate_contract::tool_definitions;
use trade_gate_mcp::McpServer;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "trade-gate", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Trade Gate tool server.
    Serve(ServeCommand),
    /// Print the tool catalog as `tools/list` JSON.
    Tools,
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration for the `serve` command.
#[derive(Args, Debug, Default)]
struct ServeCommand {
    /// Optional config file path (defaults to trade-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Fixture document backing the market backend.
    #[arg(long, value_name = "PATH")]
    fixtures: Option<PathBuf>,
    /// Transport override.
    #[arg(long, value_enum, value_name = "TRANSPORT")]
    transport: Option<TransportArg>,
    /// HTTP bind address override.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Trade Gate configuration file.
    Validate(ConfigValidateCommand),
}

/// Configuration for the `config validate` command.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to trade-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Transport selection on the command line.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum TransportArg {
    /// Line-delimited JSON-RPC over stdin/stdout.
    Stdio,
    /// JSON-RPC over HTTP `POST /rpc`.
    Http,
}

impl From<TransportArg> for ServerTransport {
    fn from(value: TransportArg) -> Self {
        match value {
            TransportArg::Stdio => Self::Stdio,
            TransportArg::Http => Self::Http,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
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
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Tools => command_tools(),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let mut config = TradeGateConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    apply_serve_overrides(&mut config, &command);
    let server = tokio::task::spawn_blocking(move || McpServer::from_config(&config))
        .await
        .map_err(|err| CliError::new(format!("server init failed: init join failed: {err}")))?
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Applies command-line overrides on top of loaded configuration.
fn apply_serve_overrides(config: &mut TradeGateConfig, command: &ServeCommand) {
    if let Some(fixtures) = &command.fixtures {
        config.backend.fixtures = Some(fixtures.to_string_lossy().into_owned());
    }
    if let Some(transport) = command.transport {
        config.server.transport = transport.into();
    }
    if let Some(bind) = &command.bind {
        config.server.bind = Some(bind.clone());
    }
}

// ============================================================================
// SECTION: Tools Command
// ============================================================================

/// Prints the tool catalog in the `tools/list` result shape.
fn command_tools() -> CliResult<ExitCode> {
    let payload = serde_json::to_string_pretty(&json!({"tools": tool_definitions()}))
        .map_err(|err| CliError::new(format!("failed to encode tool catalog: {err}")))?;
    write_stdout_line(&payload).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
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
    let _config = TradeGateConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write {stream}: {error}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
