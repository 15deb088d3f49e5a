// crates/trade-gate-mcp/tests/protocol_scenarios.rs
// ============================================================================
// Module: Protocol Scenario Tests
// Description: End-to-end JSON-RPC scenarios through a session.
// Purpose: Validate tool calls from envelope to response.
// Dependencies: trade-gate-mcp, trade-gate-contract
// ============================================================================

//! ## Overview
//! Drives full request lines through [`trade_gate_mcp::Session`] and checks
//! the encoded responses, including catalog coverage, validation details,
//! risk violations, and subscription lifecycle errors.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions are permitted."
)]

mod common;

use serde_json::json;
use trade_gate_contract::ToolName;

use crate::common::result_of;
use crate::common::send;
use crate::common::session;
use crate::common::tool_call;

/// Result type for scenario tests.
type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Instrument Scenarios
// ============================================================================

#[test]
fn instrument_find_returns_snapshot_fields_verbatim() -> TestResult {
    let mut session = session();
    let response = send(
        &mut session,
        &tool_call(1, "instrument.find", json!({"exchange_segment": "NSE_EQ", "symbol": "TCS"})),
    );
    assert_eq!(response.id, json!(1));
    let result = result_of(response)?;
    assert_eq!(result["security_id"], "11536");
    assert_eq!(result["symbol"], "TCS");
    assert_eq!(result["exchange_segment"], "NSE_EQ");
    assert_eq!(result["instrument_type"], "EQUITY");
    assert_eq!(result["expiry_flag"], "NA");
    Ok(())
}

#[test]
fn unknown_instrument_is_an_internal_error() {
    let mut session = session();
    let response = send(
        &mut session,
        &tool_call(2, "instrument.ltp", json!({"exchange_segment": "NSE_EQ", "symbol": "INFY"})),
    );
    let error = response.error.expect("error");
    assert_eq!(error.code, -32603);
    assert_eq!(error.message, "Internal error");
}

// ============================================================================
// SECTION: Order Scenarios
// ============================================================================

#[test]
fn zero_quantity_order_reports_violation_without_intent() {
    let mut session = session();
    let response = send(
        &mut session,
        &tool_call(
            3,
            "orders.prepare",
            json!({
                "exchange_segment": "NSE_EQ",
                "symbol": "TCS",
                "transaction_type": "BUY",
                "quantity": 0,
                "order_type": "MARKET",
                "product_type": "CNC"
            }),
        ),
    );
    assert!(response.result.is_none());
    let error = response.error.expect("error");
    assert_eq!(error.code, -32000);
    assert_eq!(error.message, "Quantity must be > 0");
    let data = error.data.expect("data");
    for field in ["trade_type", "instrument", "quantity", "note"] {
        assert!(data.get(field).is_none(), "intent field {field} leaked");
    }
}

#[test]
fn unsigned_quantity_past_signed_range_exceeds_limit() {
    let mut session = session();
    let response = send(
        &mut session,
        &tool_call(
            3,
            "orders.prepare",
            json!({
                "exchange_segment": "NSE_EQ",
                "symbol": "TCS",
                "transaction_type": "BUY",
                "quantity": u64::MAX,
                "order_type": "MARKET",
                "product_type": "CNC"
            }),
        ),
    );
    let error = response.error.expect("error");
    assert_eq!(error.code, -32000);
    assert_eq!(error.message, "Quantity exceeds limit");
    assert_eq!(error.data.expect("data")["kind"], "risk_violation");
}

#[test]
fn hold_transaction_type_is_the_only_field_error() {
    let mut session = session();
    let response = send(
        &mut session,
        &tool_call(
            4,
            "orders.prepare",
            json!({
                "exchange_segment": "NSE_EQ",
                "symbol": "TCS",
                "transaction_type": "HOLD",
                "quantity": 1,
                "order_type": "MARKET",
                "product_type": "CNC"
            }),
        ),
    );
    let error = response.error.expect("error");
    assert_eq!(error.code, -32000);
    assert_eq!(error.message, "Invalid arguments for orders.prepare");
    let details = &error.data.expect("data")["details"];
    assert_eq!(details, &json!({"transaction_type": "must be one of BUY, SELL"}));
}

#[test]
fn valid_order_yields_equity_intent() -> TestResult {
    let mut session = session();
    let response = send(
        &mut session,
        &tool_call(
            5,
            "orders.prepare",
            json!({
                "exchange_segment": "NSE_EQ",
                "symbol": "TCS",
                "transaction_type": "SELL",
                "quantity": 2,
                "order_type": "LIMIT",
                "product_type": "CNC",
                "price": 3500.0,
                "stop_loss": 3600.0,
                "target": 3300.0
            }),
        ),
    );
    let intent = result_of(response)?;
    assert_eq!(intent["trade_type"], "EQUITY_FUTURES");
    assert_eq!(intent["transaction_type"], "SELL");
    assert_eq!(intent["quantity"], 2);
    assert_eq!(intent["instrument"], "TCS (NSE_EQ)");
    Ok(())
}

// ============================================================================
// SECTION: Subscription Scenarios
// ============================================================================

#[test]
fn unknown_subscription_is_rejected() {
    let mut session = session();
    let response = send(
        &mut session,
        &tool_call(6, "stream.unsubscribe", json!({"subscription_id": "never-issued"})),
    );
    let error = response.error.expect("error");
    assert_eq!(error.code, -32000);
    assert_eq!(error.message, "Unknown subscription");
}

#[test]
fn subscriptions_persist_across_requests() -> TestResult {
    let mut session = session();
    let created = result_of(send(
        &mut session,
        &tool_call(
            7,
            "stream.subscribe",
            json!({"exchange_segment": "NSE_EQ", "symbol": "TCS", "feed_type": "QUOTE"}),
        ),
    ))?;
    let id = created["subscription_id"].as_str().ok_or("missing id")?.to_string();
    let status = result_of(send(&mut session, &tool_call(8, "stream.status", json!({}))))?;
    assert_eq!(status.as_array().map(Vec::len), Some(1));
    let removal = tool_call(9, "stream.unsubscribe", json!({"subscription_id": id}));
    result_of(send(&mut session, &removal))?;
    let status = result_of(send(&mut session, &tool_call(10, "stream.status", json!({}))))?;
    assert_eq!(status, json!([]));
    Ok(())
}

// ============================================================================
// SECTION: Catalog Coverage
// ============================================================================

#[test]
fn listed_tools_match_catalog_and_are_never_unknown() -> TestResult {
    let mut session = session();
    let listing = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"});
    let listed = result_of(send(&mut session, &listing))?;
    let names: Vec<&str> = listed["tools"]
        .as_array()
        .ok_or("tools must be an array")?
        .iter()
        .filter_map(|tool| tool["name"].as_str())
        .collect();
    let expected: Vec<String> = ToolName::all().iter().map(ToString::to_string).collect();
    assert_eq!(names, expected);
    for (index, name) in names.iter().enumerate() {
        let id = i64::try_from(index).map_err(|err| err.to_string())?;
        let response = send(&mut session, &tool_call(id, name, json!({})));
        if let Some(error) = response.error {
            let kind = error.data.as_ref().and_then(|data| data["kind"].as_str());
            assert_ne!(kind, Some("unknown_tool"), "{name} was not dispatched");
        }
    }
    Ok(())
}

#[test]
fn unknown_tool_is_a_tool_error() {
    let mut session = session();
    let response = send(&mut session, &tool_call(11, "orders.place", json!({})));
    let error = response.error.expect("error");
    assert_eq!(error.code, -32000);
    assert_eq!(error.data, Some(json!({"kind": "unknown_tool", "tool": "orders.place"})));
}
