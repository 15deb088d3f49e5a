// crates/trade-gate-mcp/src/lib.rs
// ============================================================================
// Module: Trade Gate MCP Library
// Description: Protocol endpoint, argument validation, and tool routing.
// Purpose: Serve the trading tool catalog over JSON-RPC lines or HTTP.
// Dependencies: crate::{audit, server, telemetry, tools, validation}
// ============================================================================

//! ## Overview
//! This crate turns the core domain into a JSON-RPC tool server. A request
//! line is parsed by the [`Session`], tool arguments are checked by
//! [`validation`], and the [`ToolRouter`] binds each catalog name to its
//! handler, running the risk pipeline before any trade intent is built.
//! Security posture: all request content is untrusted; see each module.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod server;
pub mod telemetry;
pub mod tools;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::McpAuditEvent;
pub use audit::McpAuditSink;
pub use audit::McpFileAuditSink;
pub use audit::McpNoopAuditSink;
pub use audit::McpStderrAuditSink;
pub use server::JsonRpcError;
pub use server::JsonRpcResponse;
pub use server::McpServer;
pub use server::McpServerError;
pub use server::PROTOCOL_VERSION;
pub use server::Session;
pub use server::SessionState;
pub use server::SharedSession;
pub use server::http_router;
pub use telemetry::McpMethod;
pub use telemetry::McpMetricEvent;
pub use telemetry::McpMetrics;
pub use telemetry::McpOutcome;
pub use telemetry::NoopMetrics;
pub use telemetry::ToolFamily;
pub use tools::ToolError;
pub use tools::ToolRouter;
pub use validation::ValidationError;
pub use validation::ValidationErrorSet;
pub use validation::validate;
