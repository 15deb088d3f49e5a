// crates/trade-gate-contract/tests/tool_name_order.rs
// ============================================================================
// Module: Tool Name Ordering Tests
// Description: Ensure canonical tool ordering and catalog coverage stay consistent.
// Purpose: Prevent drift between ToolName::all and the tool catalog.
// Dependencies: trade-gate-contract
// ============================================================================

//! ## Overview
//! Confirms every tool name has exactly one catalog entry, in canonical order,
//! and that the listing serializes with the wire field names.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use trade_gate_contract::ToolName;
use trade_gate_contract::tool_definitions;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn tool_name_order_matches_catalog() {
    let catalog_names: Vec<ToolName> =
        tool_definitions().into_iter().map(|definition| definition.name).collect();
    assert_eq!(ToolName::all(), catalog_names.as_slice(), "ToolName::all order drifted from tool_definitions()");
}

#[test]
fn every_tool_has_exactly_one_entry() {
    let definitions = tool_definitions();
    let unique: BTreeSet<ToolName> = definitions.iter().map(|definition| definition.name).collect();
    assert_eq!(unique.len(), definitions.len());
    assert_eq!(unique.len(), ToolName::all().len());
}

#[test]
fn listing_uses_wire_field_names() {
    let definitions = tool_definitions();
    let value = serde_json::to_value(&definitions[0]).unwrap_or_default();
    assert_eq!(value["name"], "instrument.find");
    assert_eq!(value["inputSchema"]["type"], "object");
    assert_eq!(value["inputSchema"]["required"], serde_json::json!(["exchange_segment", "symbol"]));
    assert!(value.get("input_schema").is_none());
}

#[test]
fn every_input_schema_is_an_object() {
    for definition in tool_definitions() {
        assert_eq!(definition.input_schema.to_json()["type"], "object", "{}", definition.name);
        assert!(!definition.description.is_empty());
    }
}
