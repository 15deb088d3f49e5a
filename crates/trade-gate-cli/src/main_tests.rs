// crates/trade-gate-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and serve overrides.
// Purpose: Ensure command-line overrides land in the server configuration.
// Dependencies: trade-gate-cli main helpers
// ============================================================================

//! ## Overview
//! Validates clap parsing of the `serve` flags and how they override loaded
//! configuration.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use clap::Parser;
use trade_gate_config::ServerTransport;
use trade_gate_config::TradeGateConfig;

use super::Cli;
use super::Commands;
use super::ConfigCommand;
use super::ServeCommand;
use super::TransportArg;
use super::apply_serve_overrides;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn serve_flags_parse_into_command() {
    let cli = Cli::try_parse_from([
        "trade-gate",
        "serve",
        "--fixtures",
        "desk.json",
        "--transport",
        "http",
        "--bind",
        "127.0.0.1:8787",
    ])
    .unwrap();
    let Commands::Serve(command) = cli.command else {
        panic!("expected serve command");
    };
    assert_eq!(command.fixtures, Some(PathBuf::from("desk.json")));
    assert_eq!(command.transport, Some(TransportArg::Http));
    assert_eq!(command.bind.as_deref(), Some("127.0.0.1:8787"));
    assert!(command.config.is_none());
}

#[test]
fn config_validate_parses_path() {
    let args = ["trade-gate", "config", "validate", "--config", "x.toml"];
    let cli = Cli::try_parse_from(args).unwrap();
    let Commands::Config {
        command: ConfigCommand::Validate(command),
    } = cli.command
    else {
        panic!("expected config validate command");
    };
    assert_eq!(command.config, Some(PathBuf::from("x.toml")));
}

#[test]
fn unknown_transport_is_rejected() {
    assert!(Cli::try_parse_from(["trade-gate", "serve", "--transport", "sse"]).is_err());
}

#[test]
fn overrides_replace_only_given_fields() {
    let mut config = TradeGateConfig::default();
    config.server.bind = Some("127.0.0.1:9000".to_string());
    apply_serve_overrides(
        &mut config,
        &ServeCommand {
            fixtures: Some(PathBuf::from("fixtures/desk.json")),
            transport: Some(TransportArg::Http),
            ..ServeCommand::default()
        },
    );
    assert_eq!(config.backend.fixtures.as_deref(), Some("fixtures/desk.json"));
    assert_eq!(config.server.transport, ServerTransport::Http);
    assert_eq!(config.server.bind.as_deref(), Some("127.0.0.1:9000"));
}

#[test]
fn empty_overrides_leave_config_untouched() {
    let mut config = TradeGateConfig::default();
    apply_serve_overrides(&mut config, &ServeCommand::default());
    assert_eq!(config, TradeGateConfig::default());
}
