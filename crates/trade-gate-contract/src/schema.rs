// crates/trade-gate-contract/src/schema.rs
// ============================================================================
// Module: Argument Schema Dialect
// Description: Minimal typed schema model for tool arguments.
// Purpose: Describe tool inputs for listing and validation without a JSON-Schema engine.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Tool inputs are described with a small, closed subset of JSON Schema:
//! `type` (single or union), `properties`, `required`, `enum`,
//! `additionalProperties`, `default`, and `description`. The model serializes
//! to the equivalent JSON Schema keywords for `tools/list` and carries the
//! runtime type classification the validator relies on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Type Names
// ============================================================================

/// JSON value type names understood by the schema dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeName {
    /// JSON string.
    String,
    /// Integral JSON number.
    Integer,
    /// Any JSON number.
    Number,
    /// JSON boolean.
    Boolean,
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON null.
    Null,
}

impl TypeName {
    /// Returns the dialect label for the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
        }
    }

    /// Classifies a runtime value.
    ///
    /// Numbers written without a fraction or exponent classify as `integer`;
    /// every other number (including `5.0`) classifies as `number`.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(number) if number.is_i64() || number.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns true when `value` satisfies this type.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        let actual = Self::of(value);
        actual == self || (self == Self::Number && actual == Self::Integer)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a schema node: one type name or a union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// Exactly one type.
    Single(TypeName),
    /// Any of the listed types.
    Union(Vec<TypeName>),
}

impl SchemaType {
    /// Returns true when `value` satisfies any declared type.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Single(name) => name.accepts(value),
            Self::Union(names) => names.iter().any(|name| name.accepts(value)),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(name) => f.write_str(name.as_str()),
            Self::Union(names) => {
                for (index, name) in names.iter().enumerate() {
                    if index > 0 {
                        f.write_str("|")?;
                    }
                    f.write_str(name.as_str())?;
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Recursive argument schema node.
///
/// # Invariants
/// - Serialization emits only the keywords that are set, using JSON Schema names.
/// - Property iteration order is lexical and therefore deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Schema {
    /// Declared type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Child property schemas.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    /// Required property names.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Permitted values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,
    /// Whether keys outside `properties` are permitted.
    #[serde(rename = "additionalProperties", skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    /// Default value applied by handlers when the key is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Schema {
    /// Creates a schema of a single type.
    #[must_use]
    pub fn of_type(name: TypeName) -> Self {
        Self {
            schema_type: Some(SchemaType::Single(name)),
            ..Self::default()
        }
    }

    /// Creates a schema accepting any of the listed types.
    #[must_use]
    pub fn union(names: &[TypeName]) -> Self {
        Self {
            schema_type: Some(SchemaType::Union(names.to_vec())),
            ..Self::default()
        }
    }

    /// Creates an object schema with no properties.
    #[must_use]
    pub fn object() -> Self {
        Self::of_type(TypeName::Object)
    }

    /// Creates a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::of_type(TypeName::String)
    }

    /// Creates a number schema.
    #[must_use]
    pub fn number() -> Self {
        Self::of_type(TypeName::Number)
    }

    /// Creates an integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::of_type(TypeName::Integer)
    }

    /// Creates a string schema restricted to the listed labels.
    #[must_use]
    pub fn labels(values: &[&str]) -> Self {
        Self {
            allowed: Some(values.iter().map(|value| Value::String((*value).to_string())).collect()),
            ..Self::string()
        }
    }

    /// Adds a child property.
    #[must_use]
    pub fn property(mut self, name: &str, schema: Self) -> Self {
        self.properties.insert(name.to_string(), schema);
        self
    }

    /// Marks the listed properties as required.
    #[must_use]
    pub fn require(mut self, names: &[&str]) -> Self {
        self.required.extend(names.iter().map(|name| (*name).to_string()));
        self
    }

    /// Rejects keys outside the declared properties.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.additional_properties = Some(false);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Returns true when `additionalProperties` is explicitly false.
    #[must_use]
    pub fn rejects_unknown_keys(&self) -> bool {
        self.additional_properties == Some(false)
    }

    /// Serializes the schema to its JSON Schema form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions."
    )]

    use proptest::prelude::*;
    use serde_json::json;

    use super::Schema;
    use super::SchemaType;
    use super::TypeName;

    #[test]
    fn classifies_runtime_values() {
        assert_eq!(TypeName::of(&json!("x")), TypeName::String);
        assert_eq!(TypeName::of(&json!(3)), TypeName::Integer);
        assert_eq!(TypeName::of(&json!(3.0)), TypeName::Number);
        assert_eq!(TypeName::of(&json!(3.5)), TypeName::Number);
        assert_eq!(TypeName::of(&json!(true)), TypeName::Boolean);
        assert_eq!(TypeName::of(&json!([])), TypeName::Array);
        assert_eq!(TypeName::of(&json!({})), TypeName::Object);
        assert_eq!(TypeName::of(&json!(null)), TypeName::Null);
    }

    #[test]
    fn integers_satisfy_number_but_not_the_reverse() {
        assert!(TypeName::Number.accepts(&json!(7)));
        assert!(!TypeName::Integer.accepts(&json!(7.25)));
        assert!(!TypeName::String.accepts(&json!(7)));
    }

    #[test]
    fn union_types_render_with_pipes() {
        let union = SchemaType::Union(vec![TypeName::String, TypeName::Null]);
        assert_eq!(union.to_string(), "string|null");
        assert!(union.accepts(&json!(null)));
        assert!(!union.accepts(&json!(1)));
    }

    #[test]
    fn schema_serializes_json_schema_keywords() {
        let schema = Schema::object()
            .property("side", Schema::labels(&["BUY", "SELL"]))
            .property("qty", Schema::integer().with_default(json!(1)))
            .require(&["side"])
            .strict();
        assert_eq!(
            schema.to_json(),
            json!({
                "type": "object",
                "properties": {
                    "qty": {"type": "integer", "default": 1},
                    "side": {"type": "string", "enum": ["BUY", "SELL"]}
                },
                "required": ["side"],
                "additionalProperties": false
            })
        );
        assert!(schema.rejects_unknown_keys());
        assert_eq!(
            Schema::union(&[TypeName::Integer, TypeName::Null]).to_json()["type"],
            json!(["integer", "null"])
        );
    }

    proptest! {
        #[test]
        fn any_i64_is_an_integer(value in any::<i64>()) {
            prop_assert_eq!(TypeName::of(&json!(value)), TypeName::Integer);
            prop_assert!(TypeName::Number.accepts(&json!(value)));
        }

        #[test]
        fn fractional_floats_are_numbers(
            whole in -1_000_000_i64..1_000_000,
            frac in 0.001_f64..0.999
        ) {
            #[allow(clippy::cast_precision_loss, reason = "Bounded test range.")]
            let value = whole as f64 + frac;
            prop_assert_eq!(TypeName::of(&json!(value)), TypeName::Number);
        }
    }
}
