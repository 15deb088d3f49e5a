// crates/trade-gate-core/src/arguments.rs
// ============================================================================
// Module: Tool Arguments
// Description: Loosely typed tool argument maps and typed accessors.
// Purpose: Give handlers and checks one place to read argument values.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Tool arguments arrive as a JSON object. They are kept as a
//! `serde_json::Map` so the validator can reason about the raw value variants;
//! handlers read them through the accessors below instead of coercing ad hoc.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Raw tool arguments keyed by field name.
pub type Arguments = Map<String, Value>;

// ============================================================================
// SECTION: Accessors
// ============================================================================

/// Returns the string value for `key`, if present and a string.
#[must_use]
pub fn str_arg<'a>(args: &'a Arguments, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

/// Returns the numeric value for `key` as `f64`, if present and numeric.
#[must_use]
pub fn f64_arg(args: &Arguments, key: &str) -> Option<f64> {
    args.get(key).and_then(Value::as_f64)
}

/// Returns the integral value for `key`, if present and an integer.
#[must_use]
pub fn i64_arg(args: &Arguments, key: &str) -> Option<i64> {
    args.get(key).and_then(Value::as_i64)
}

/// Returns the unsigned integral value for `key`, if present and non-negative.
#[must_use]
pub fn u64_arg(args: &Arguments, key: &str) -> Option<u64> {
    args.get(key).and_then(Value::as_u64)
}

/// Returns true when `key` is present with a non-null value.
#[must_use]
pub fn has_arg(args: &Arguments, key: &str) -> bool {
    args.get(key).is_some_and(|value| !value.is_null())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
