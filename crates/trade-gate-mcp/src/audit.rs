// crates/trade-gate-mcp/src/audit.rs
// ============================================================================
// Module: MCP Audit Logging
// Description: Structured JSON-line audit events for protocol requests.
// Purpose: Record one event per handled line without touching the protocol stream.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! Every handled request line yields one [`McpAuditEvent`]. Sinks serialize
//! events as JSON lines. Stdout carries protocol responses, so the default
//! sink writes to stderr; a file sink appends to a configured path.
//! Security posture: events carry method, tool, and error metadata only;
//! argument values and backend payloads are never logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Audit Event
// ============================================================================

/// Audit event for one request line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct McpAuditEvent {
    /// Event name.
    pub event: &'static str,
    /// Wall-clock time in Unix milliseconds.
    pub timestamp_ms: u64,
    /// JSON-RPC id rendered as text, when present.
    pub request_id: Option<String>,
    /// Transport label.
    pub transport: &'static str,
    /// Method label.
    pub method: &'static str,
    /// Tool name for tools/call.
    pub tool: Option<String>,
    /// Outcome label.
    pub outcome: &'static str,
    /// JSON-RPC error code when the request failed.
    pub error_code: Option<i64>,
    /// Error kind label when the request failed.
    pub error_kind: Option<&'static str>,
    /// Session lifecycle state after the request.
    pub session_state: &'static str,
    /// Request size in bytes.
    pub request_bytes: usize,
    /// Response size in bytes; zero for notifications.
    pub response_bytes: usize,
}

/// Audit event fields supplied by the server.
#[derive(Debug, Clone)]
pub struct McpAuditEventParams {
    /// JSON-RPC id rendered as text, when present.
    pub request_id: Option<String>,
    /// Transport label.
    pub transport: &'static str,
    /// Method label.
    pub method: &'static str,
    /// Tool name for tools/call.
    pub tool: Option<String>,
    /// Outcome label.
    pub outcome: &'static str,
    /// JSON-RPC error code when the request failed.
    pub error_code: Option<i64>,
    /// Error kind label when the request failed.
    pub error_kind: Option<&'static str>,
    /// Session lifecycle state after the request.
    pub session_state: &'static str,
    /// Request size in bytes.
    pub request_bytes: usize,
    /// Response size in bytes.
    pub response_bytes: usize,
}

impl McpAuditEvent {
    /// Builds a request event stamped with the current time.
    #[must_use]
    pub fn new(params: McpAuditEventParams) -> Self {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        Self {
            event: "mcp_request",
            timestamp_ms: u64::try_from(millis).unwrap_or_default(),
            request_id: params.request_id,
            transport: params.transport,
            method: params.method,
            tool: params.tool,
            outcome: params.outcome,
            error_code: params.error_code,
            error_kind: params.error_kind,
            session_state: params.session_state,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for request events.
pub trait McpAuditSink: Send + Sync {
    /// Records one audit event.
    fn record(&self, event: &McpAuditEvent);
}

/// Audit sink writing JSON lines to stderr.
pub struct McpStderrAuditSink;

impl McpAuditSink for McpStderrAuditSink {
    fn record(&self, event: &McpAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink appending JSON lines to a file.
pub struct McpFileAuditSink {
    /// Open file handle for appending audit events.
    file: Mutex<File>,
}

impl McpFileAuditSink {
    /// Opens or creates the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when the file cannot be opened.
    pub fn new(path: &Path) -> Result<Self, std::io::Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl McpAuditSink for McpFileAuditSink {
    fn record(&self, event: &McpAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that drops all events.
pub struct McpNoopAuditSink;

impl McpAuditSink for McpNoopAuditSink {
    fn record(&self, _event: &McpAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
