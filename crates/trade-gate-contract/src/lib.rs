// crates/trade-gate-contract/src/lib.rs
// ============================================================================
// Module: Trade Gate Contract Library
// Description: Tool identifiers, schema dialect, and the tool catalog.
// Purpose: Define the external tool surface shared by the server and the CLI.
// Dependencies: crate::{schema, tooling}
// ============================================================================

//! ## Overview
//! The contract crate is the single source of truth for tool names and their
//! argument schemas. It has no runtime behavior beyond building the catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod schema;
pub mod tooling;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use schema::Schema;
pub use schema::SchemaType;
pub use schema::TypeName;
pub use tooling::ToolDefinition;
pub use tooling::ToolName;
pub use tooling::tool_definition;
pub use tooling::tool_definitions;
