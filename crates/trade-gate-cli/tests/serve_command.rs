// crates/trade-gate-cli/tests/serve_command.rs
// ============================================================================
// Module: CLI Serve Command Tests
// Description: End-to-end tests driving the `trade-gate` binary.
// Purpose: Ensure the stdio server answers requests and bad config fails early.
// Dependencies: trade-gate-cli binary
// ============================================================================

//! ## Overview
//! Spawns the `trade-gate` binary with temporary config and fixture files,
//! pipes JSON-RPC lines over stdin, and checks stdout responses.
//!
//! Security posture: bad configuration must fail before serving.

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

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;

use serde_json::Value;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the path of the built binary.
fn trade_gate_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_trade-gate"))
}

/// Writes a one-instrument fixture document and returns its path.
fn write_fixtures(dir: &Path) -> PathBuf {
    let path = dir.join("fixtures.json");
    let document = r#"{
        "instruments": [{
            "security_id": "11536",
            "symbol": "TCS",
            "exchange_segment": "NSE_EQ",
            "instrument_type": "EQUITY",
            "expiry_flag": "NA",
            "trading_allowed": true
        }],
        "portfolio": {"holdings": [{"symbol": "TCS", "quantity": 3}]}
    }"#;
    fs::write(&path, document).expect("write fixtures");
    path
}

/// Writes a config file with audit disabled and returns its path.
fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("trade-gate.toml");
    fs::write(&path, body).expect("write config");
    path
}

/// Runs `serve` over stdio with the given input lines and returns stdout lines.
fn serve_lines(dir: &TempDir, input: &str) -> Vec<Value> {
    let config = write_config(dir, "[server.audit]\nenabled = false\n");
    let fixtures = write_fixtures(dir.path());
    let mut child = Command::new(trade_gate_bin())
        .args(["serve", "--config"])
        .arg(&config)
        .arg("--fixtures")
        .arg(&fixtures)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn trade-gate serve");
    child.stdin.take().expect("stdin").write_all(input.as_bytes()).expect("write stdin");
    let output = child.wait_with_output().expect("wait for trade-gate");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout)
        .expect("utf-8 stdout")
        .lines()
        .map(|line| serde_json::from_str(line).expect("response json"))
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn stdio_session_answers_each_request() {
    let dir = tempfile::tempdir().unwrap();
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        concat!(
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"instrument.find","#,
            r#""arguments":{"exchange_segment":"NSE_EQ","symbol":"TCS"}}}"#
        ),
        "not json",
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"portfolio.holdings"}}"#,
    ]
    .join("\n");
    let responses = serve_lines(&dir, &input);
    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "trade-gate");
    assert_eq!(responses[1]["result"]["security_id"], "11536");
    assert_eq!(responses[2]["error"]["code"], -32700);
    assert_eq!(responses[3]["result"][0]["quantity"], 3);
}

#[test]
fn tools_command_prints_catalog() {
    let output =
        Command::new(trade_gate_bin()).arg("tools").output().expect("run trade-gate tools");
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout).expect("catalog json");
    let tools = payload["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 20);
    assert!(tools.iter().all(|tool| tool["inputSchema"]["type"] == "object"));
}

#[test]
fn serve_without_fixtures_fails_before_serving() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "[server.audit]\nenabled = false\n");
    let output = Command::new(trade_gate_bin())
        .args(["serve", "--config"])
        .arg(&config)
        .stdin(Stdio::null())
        .output()
        .expect("run trade-gate serve");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("backend.fixtures"));
}

#[test]
fn config_validate_reports_invalid_limits() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_config(&dir, "[risk]\nmax_quantity = 5\n");
    let output = Command::new(trade_gate_bin())
        .args(["config", "validate", "--config"])
        .arg(&good)
        .output()
        .expect("run config validate");
    assert!(output.status.success());

    let bad = write_config(&dir, "[risk]\nmax_quantity = 0\n");
    let output = Command::new(trade_gate_bin())
        .args(["config", "validate", "--config"])
        .arg(&bad)
        .output()
        .expect("run config validate");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_quantity"));
}
