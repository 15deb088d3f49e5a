// crates/trade-gate-mcp/src/validation.rs
// ============================================================================
// Module: Tool Argument Validation
// Description: Checks raw tool arguments against catalog schemas.
// Purpose: Reject malformed tool input before any handler or backend call runs.
// Dependencies: trade-gate-contract, trade-gate-core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Validation is aggregate: every required, type, enum, and unknown-key rule
//! is evaluated and merged into one field-to-message map. The only
//! short-circuit is a non-object argument value, reported under the synthetic
//! `arguments` key. When a field fails both its type and its enum rule the
//! enum message is the one reported.
//! Security posture: tool arguments are untrusted client input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;
use trade_gate_contract::Schema;
use trade_gate_contract::ToolName;
use trade_gate_contract::TypeName;
use trade_gate_contract::tool_definition;
use trade_gate_core::Arguments;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Field name to message map produced by a failed validation.
pub type ValidationErrorSet = BTreeMap<String, String>;

/// Synthetic key used when the argument value is not an object.
pub const ARGUMENTS_KEY: &str = "arguments";

/// Validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The tool name is not in the catalog.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// One or more argument rules failed.
    #[error("Invalid arguments for {tool}")]
    InvalidArguments {
        /// Tool whose schema was applied.
        tool: ToolName,
        /// Aggregated field errors.
        errors: ValidationErrorSet,
    },
}

// ============================================================================
// SECTION: Entry Points
// ============================================================================

/// Validates `args` against the schema of `tool_name`.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownTool`] for names outside the catalog and
/// [`ValidationError::InvalidArguments`] when any rule fails.
pub fn validate(tool_name: &str, args: &Value) -> Result<(), ValidationError> {
    let tool = ToolName::parse(tool_name)
        .ok_or_else(|| ValidationError::UnknownTool(tool_name.to_string()))?;
    validate_tool(tool, args).map(|_| ())
}

/// Validates `args` for a resolved tool and returns them as an argument map.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidArguments`] when any rule fails.
pub fn validate_tool(tool: ToolName, args: &Value) -> Result<&Arguments, ValidationError> {
    let schema = tool_definition(tool).input_schema;
    validate_against(&schema, args).map_err(|errors| ValidationError::InvalidArguments {
        tool,
        errors,
    })
}

/// Validates `args` against an arbitrary object schema.
///
/// # Errors
///
/// Returns the aggregated [`ValidationErrorSet`] when any rule fails.
pub fn validate_against<'a>(
    schema: &Schema,
    args: &'a Value,
) -> Result<&'a Arguments, ValidationErrorSet> {
    let Value::Object(map) = args else {
        return Err(BTreeMap::from([(ARGUMENTS_KEY.to_string(), "expected object".to_string())]));
    };
    let mut errors = ValidationErrorSet::new();
    for field in &schema.required {
        if !map.contains_key(field) {
            errors.insert(field.clone(), "is required".to_string());
        }
    }
    for (key, value) in map {
        match schema.properties.get(key) {
            Some(property) => {
                if let Some(message) = check_value(property, value) {
                    errors.insert(key.clone(), message);
                }
            }
            None if schema.rejects_unknown_keys() => {
                errors.insert(key.clone(), "is not permitted".to_string());
            }
            None => {}
        }
    }
    if errors.is_empty() { Ok(map) } else { Err(errors) }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Applies the type and enum rules of one property.
fn check_value(schema: &Schema, value: &Value) -> Option<String> {
    let mut message = None;
    if let Some(declared) = &schema.schema_type
        && !declared.accepts(value)
    {
        message = Some(format!("expected {declared}, got {}", TypeName::of(value)));
    }
    if let Some(allowed) = &schema.allowed
        && !allowed.contains(value)
    {
        message = Some(format!("must be one of {}", render_allowed(allowed)));
    }
    message
}

/// Renders permitted values as a comma-separated list.
fn render_allowed(allowed: &[Value]) -> String {
    allowed
        .iter()
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
