// crates/trade-gate-mcp/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared fixture documents and session helpers for MCP tests.
// Purpose: Provide reusable test infrastructure for deterministic testing.
// Dependencies: trade-gate-core, trade-gate-mcp, trade-gate-providers
// ============================================================================

//! ## Overview
//! Shared fixture documents, a pinned execution context, and JSON-RPC line
//! helpers used across the MCP integration tests.
//!
//! Security posture: fixtures exercise the untrusted request boundary.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unwrap_in_result,
    reason = "Test fixtures favor direct unwraps for setup clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use serde_json::json;
use time::macros::datetime;
use trade_gate_core::ContextMeta;
use trade_gate_core::ExecutionContext;
use trade_gate_mcp::JsonRpcResponse;
use trade_gate_mcp::Session;
use trade_gate_mcp::ToolRouter;
use trade_gate_providers::FixtureBackend;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Returns a fixture document with one index and one equity instrument.
pub fn fixture_document() -> Value {
    json!({
        "instruments": [
            {
                "security_id": "13",
                "symbol": "NIFTY",
                "display_name": "Nifty 50",
                "exchange_segment": "IDX_I",
                "instrument_type": "INDEX",
                "expiry_flag": "N",
                "trading_allowed": true,
                "ltp": {"last_price": 21005.0},
                "expiries": ["2024-01-25", "2024-02-01"],
                "option_chains": {
                    "2024-01-25": [
                        {"security_id": "C21000", "strike": 21000.0, "option_type": "CE", "ltp": 120.0},
                        {"security_id": "P21000", "strike": 21000.0, "option_type": "PE", "ltp": 110.0}
                    ]
                }
            },
            {
                "security_id": "11536",
                "symbol": "TCS",
                "display_name": "Tata Consultancy Services",
                "exchange_segment": "NSE_EQ",
                "segment": "E",
                "instrument": "EQUITY",
                "instrument_type": "EQUITY",
                "expiry_flag": "NA",
                "isin": "INE467B01029",
                "trading_allowed": true,
                "bracket_supported": true,
                "mtf_leverage": 4.0,
                "buy_margin_pct": 25.0,
                "ltp": {"last_price": 3500.0}
            }
        ],
        "portfolio": {
            "holdings": [{"symbol": "TCS", "quantity": 3}],
            "positions": [],
            "funds": {"available": 50000.0}
        }
    })
}

/// Builds a fixture backend from [`fixture_document`].
pub fn fixture_backend() -> FixtureBackend {
    FixtureBackend::from_json_str(&fixture_document().to_string()).expect("fixture")
}

/// Builds an execution context pinned to 10:00 IST on a trading day.
pub fn pinned_context() -> ExecutionContext {
    ExecutionContext::new(Arc::new(fixture_backend())).with_meta(ContextMeta {
        now: Some(datetime!(2024-01-02 10:00 +5:30)),
        spot_price: None,
    })
}

/// Builds a session with default limits over the pinned context.
pub fn session() -> Session {
    Session::new(ToolRouter::default(), pinned_context())
}

// ============================================================================
// SECTION: Request Helpers
// ============================================================================

/// Builds a `tools/call` request envelope.
pub fn tool_call(id: i64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
}

/// Sends one request and decodes the single response line.
pub fn send(session: &mut Session, request: &Value) -> JsonRpcResponse {
    let line = session.handle_line(request.to_string().as_bytes()).expect("response line");
    serde_json::from_str(&line).expect("response json")
}

/// Returns the successful result of a response or an error message.
pub fn result_of(response: JsonRpcResponse) -> Result<Value, String> {
    match (response.result, response.error) {
        (Some(result), None) => Ok(result),
        (_, Some(error)) => Err(format!("rpc error {}: {}", error.code, error.message)),
        (None, None) => Err("empty response".to_string()),
    }
}
