// crates/trade-gate-mcp/src/server.rs
// ============================================================================
// Module: MCP Server
// Description: JSON-RPC session, stdio line loop, and HTTP transport.
// Purpose: Translate router outcomes into protocol responses without ever
//          terminating on a bad request.
// Dependencies: trade-gate-config, trade-gate-core, trade-gate-providers, axum, tokio
// ============================================================================

//! ## Overview
//! A [`Session`] owns one execution context and one router and handles one
//! request line at a time. Lifecycle state moves `Uninitialized ->
//! Initialized -> Ready` and is reported to audit, but never gates a method.
//! A request whose envelope has no `id` member is a notification and produces
//! no output. Panics raised while handling a request are caught and answered
//! with an internal error so the loop continues.
//! Security posture: every line is untrusted input and size-limited before
//! parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::BufRead;
use std::io::Write;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use trade_gate_config::AuditConfig;
use trade_gate_config::ServerTransport;
use trade_gate_config::TradeGateConfig;
use trade_gate_contract::ToolName;
use trade_gate_core::ExecutionContext;
use trade_gate_core::MarketBackend;
use trade_gate_core::RiskPipeline;
use trade_gate_providers::FixtureBackend;

use crate::audit::McpAuditEvent;
use crate::audit::McpAuditEventParams;
use crate::audit::McpAuditSink;
use crate::audit::McpFileAuditSink;
use crate::audit::McpNoopAuditSink;
use crate::audit::McpStderrAuditSink;
use crate::telemetry::McpMethod;
use crate::telemetry::McpMetricEvent;
use crate::telemetry::McpMetrics;
use crate::telemetry::McpOutcome;
use crate::telemetry::NoopMetrics;
use crate::tools::INTERNAL_ERROR_CODE;
use crate::tools::ToolError;
use crate::tools::ToolRouter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Protocol version reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
/// JSON-RPC parse error code.
pub const PARSE_ERROR_CODE: i64 = -32700;
/// JSON-RPC invalid request code.
pub const INVALID_REQUEST_CODE: i64 = -32600;
/// JSON-RPC method not found code.
pub const METHOD_NOT_FOUND_CODE: i64 = -32601;
/// Default maximum request line size in bytes.
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;
/// HTTP route accepting JSON-RPC envelopes.
pub const RPC_ROUTE: &str = "/rpc";

/// Pre-encoded internal error used when a response cannot be produced.
const INTERNAL_ERROR_FALLBACK: &str =
    r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal error"}}"#;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Server construction and transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum McpServerError {
    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
    /// A collaborator could not be initialized.
    #[error("init error: {0}")]
    Init(String),
    /// The transport channel failed.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// JSON-RPC response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol marker, always `2.0`.
    pub jsonrpc: String,
    /// Request identifier echoed back.
    pub id: Value,
    /// Success payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,
    /// Error message.
    pub message: String,
    /// Structured error data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Builds a success response.
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Builds an error response.
    fn failure(id: Value, failure: RpcFailure) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: failure.code,
                message: failure.message,
                data: failure.data,
            }),
        }
    }
}

/// Protocol-level failure before encoding.
struct RpcFailure {
    /// JSON-RPC error code.
    code: i64,
    /// Error message.
    message: String,
    /// Structured error data.
    data: Option<Value>,
    /// Stable error kind label for audit and metrics.
    kind: &'static str,
}

impl RpcFailure {
    /// Builds a failure without data.
    fn new(code: i64, message: &str, kind: &'static str) -> Self {
        Self {
            code,
            message: message.to_string(),
            data: None,
            kind,
        }
    }

    /// Builds an internal error carrying a diagnostic message.
    fn internal(kind: &'static str, message: &str) -> Self {
        Self {
            data: Some(json!({"kind": kind, "message": message})),
            ..Self::new(INTERNAL_ERROR_CODE, "Internal error", kind)
        }
    }
}

impl From<ToolError> for RpcFailure {
    fn from(error: ToolError) -> Self {
        Self {
            code: error.code(),
            message: error.rpc_message(),
            data: Some(error.rpc_data()),
            kind: error.kind(),
        }
    }
}

// ============================================================================
// SECTION: Session State
// ============================================================================

/// Protocol lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No `initialize` received yet.
    #[default]
    Uninitialized,
    /// `initialize` answered.
    Initialized,
    /// `initialized` notification received.
    Ready,
}

impl SessionState {
    /// Returns a stable label for the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Ready => "ready",
        }
    }
}

/// Per-request observability fields collected while handling a line.
struct RequestRecord {
    /// Rendered request id.
    request_id: Option<String>,
    /// Method classification.
    method: McpMethod,
    /// Tool name for tools/call.
    tool: Option<String>,
    /// Error code of a failed request.
    error_code: Option<i64>,
    /// Error kind of a failed request.
    error_kind: Option<&'static str>,
    /// Request size in bytes.
    request_bytes: usize,
}

impl RequestRecord {
    /// Creates a record for a line of `request_bytes` bytes.
    const fn new(request_bytes: usize) -> Self {
        Self {
            request_id: None,
            method: McpMethod::Invalid,
            tool: None,
            error_code: None,
            error_kind: None,
            request_bytes,
        }
    }

    /// Marks the request as failed.
    fn fail(&mut self, failure: &RpcFailure) {
        self.error_code = Some(failure.code);
        self.error_kind = Some(failure.kind);
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// One protocol session bound to a router and an execution context.
///
/// # Invariants
/// - Exactly one response per request that carries an `id` member.
/// - No request, however malformed, ends the session.
pub struct Session {
    /// Tool router.
    router: ToolRouter,
    /// Execution context owning the backend handle and subscriptions.
    context: ExecutionContext,
    /// Lifecycle state.
    state: SessionState,
    /// Server name reported by `initialize`.
    server_name: String,
    /// Maximum accepted line size in bytes.
    max_line_bytes: usize,
    /// Transport label for audit and metrics.
    transport: ServerTransport,
    /// Audit sink.
    audit: Arc<dyn McpAuditSink>,
    /// Metrics sink.
    metrics: Arc<dyn McpMetrics>,
}

impl Session {
    /// Creates a stdio session with default limits and no-op sinks.
    #[must_use]
    pub fn new(router: ToolRouter, context: ExecutionContext) -> Self {
        Self {
            router,
            context,
            state: SessionState::Uninitialized,
            server_name: "trade-gate".to_string(),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            transport: ServerTransport::Stdio,
            audit: Arc::new(McpNoopAuditSink),
            metrics: Arc::new(NoopMetrics),
        }
    }

    /// Sets the server name reported by `initialize`.
    #[must_use]
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Sets the maximum accepted line size.
    #[must_use]
    pub const fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Sets the transport label.
    #[must_use]
    pub const fn with_transport(mut self, transport: ServerTransport) -> Self {
        self.transport = transport;
        self
    }

    /// Sets the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn McpAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Sets the metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn McpMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the execution context.
    #[must_use]
    pub const fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Returns the mutable execution context.
    pub const fn context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.context
    }

    /// Handles one request line; returns the encoded response, if any.
    pub fn handle_line(&mut self, line: &[u8]) -> Option<String> {
        if line.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        if line.len() > self.max_line_bytes {
            return Some(self.reject_oversized(line.len()));
        }
        let started = Instant::now();
        let mut record = RequestRecord::new(line.len());
        let response = self.process(line, &mut record).map(|response| encode(&response));
        let response_bytes = response.as_ref().map_or(0, String::len);
        self.observe(&record, response_bytes, started.elapsed());
        response
    }

    /// Answers a line that exceeded the size limit.
    fn reject_oversized(&self, request_bytes: usize) -> String {
        let started = Instant::now();
        let mut record = RequestRecord::new(request_bytes);
        let failure =
            RpcFailure::new(INVALID_REQUEST_CODE, "Request too large", "request_too_large");
        record.fail(&failure);
        let response = encode(&JsonRpcResponse::failure(Value::Null, failure));
        self.observe(&record, response.len(), started.elapsed());
        response
    }

    /// Serves newline-delimited requests until end of input.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError::Transport`] when reading or writing fails.
    pub fn serve_stdio<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> Result<(), McpServerError> {
        let mut line = Vec::new();
        loop {
            let read = read_line_bounded(&mut reader, self.max_line_bytes, &mut line)
                .map_err(|err| McpServerError::Transport(err.to_string()))?;
            let response = match read {
                LineRead::Eof => return Ok(()),
                LineRead::Line => self.handle_line(&line),
                LineRead::Oversized(bytes) => Some(self.reject_oversized(bytes)),
            };
            if let Some(response) = response {
                writeln!(writer, "{response}")
                    .and_then(|()| writer.flush())
                    .map_err(|err| McpServerError::Transport(err.to_string()))?;
            }
        }
    }

    /// Parses and dispatches a line within the size limit.
    fn process(&mut self, line: &[u8], record: &mut RequestRecord) -> Option<JsonRpcResponse> {
        let Ok(text) = std::str::from_utf8(line) else {
            return Some(fail(record, Value::Null, parse_error("request is not valid utf-8")));
        };
        let value: Value = match serde_json::from_str(text.trim()) {
            Ok(value) => value,
            Err(err) => return Some(fail(record, Value::Null, parse_error(&err.to_string()))),
        };
        let Value::Object(mut envelope) = value else {
            return Some(fail(record, Value::Null, invalid_request()));
        };
        let id = envelope.remove("id");
        record.request_id = id.as_ref().map(render_id);
        let method = match envelope.remove("method") {
            Some(Value::String(method)) => method,
            Some(_) | None => String::new(),
        };
        record.method = McpMethod::from_name(&method);
        let params = envelope.remove("params").unwrap_or(Value::Null);
        let outcome = catch_unwind(AssertUnwindSafe(|| self.dispatch(&method, params, record)));
        let result = outcome
            .unwrap_or_else(|_| Err(RpcFailure::internal("panic", "request handler panicked")));
        match (id, result) {
            (None, Ok(_)) => None,
            (None, Err(failure)) => {
                record.fail(&failure);
                None
            }
            (Some(id), Ok(result)) => Some(JsonRpcResponse::success(id, result)),
            (Some(id), Err(failure)) => Some(fail(record, id, failure)),
        }
    }

    /// Routes one method call.
    fn dispatch(
        &mut self,
        method: &str,
        params: Value,
        record: &mut RequestRecord,
    ) -> Result<Value, RpcFailure> {
        match method {
            "initialize" => {
                self.state = SessionState::Initialized;
                Ok(json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {"tools": {}},
                    "serverInfo": {
                        "name": self.server_name,
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                }))
            }
            "initialized" | "notifications/initialized" => {
                self.state = SessionState::Ready;
                Ok(json!({}))
            }
            "tools/list" => {
                let tools = serde_json::to_value(self.router.list_tools())
                    .map_err(|err| RpcFailure::internal("serialization", &err.to_string()))?;
                Ok(json!({"tools": tools}))
            }
            "tools/call" => self.call_tool(params, record),
            _ => {
                Err(RpcFailure::new(METHOD_NOT_FOUND_CODE, "Method not found", "method_not_found"))
            }
        }
    }

    /// Executes a `tools/call` request.
    fn call_tool(
        &mut self,
        params: Value,
        record: &mut RequestRecord,
    ) -> Result<Value, RpcFailure> {
        let Value::Object(mut params) = params else {
            return Err(ToolError::UnknownTool(String::new()).into());
        };
        let name = match params.remove("name") {
            Some(Value::String(name)) => name,
            Some(other) => return Err(ToolError::UnknownTool(other.to_string()).into()),
            None => return Err(ToolError::UnknownTool(String::new()).into()),
        };
        record.tool = Some(name.clone());
        let arguments = match params.remove("arguments") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(arguments) => arguments,
        };
        self.router
            .handle_tool_call(&mut self.context, &name, &arguments)
            .map_err(RpcFailure::from)
    }

    /// Emits audit and metric events for a handled line.
    fn observe(&self, record: &RequestRecord, response_bytes: usize, latency: Duration) {
        let outcome = if record.error_code.is_some() { McpOutcome::Error } else { McpOutcome::Ok };
        self.audit.record(&McpAuditEvent::new(McpAuditEventParams {
            request_id: record.request_id.clone(),
            transport: self.transport.as_str(),
            method: record.method.as_str(),
            tool: record.tool.clone(),
            outcome: outcome.as_str(),
            error_code: record.error_code,
            error_kind: record.error_kind,
            session_state: self.state.as_str(),
            request_bytes: record.request_bytes,
            response_bytes,
        }));
        let event = McpMetricEvent {
            transport: self.transport,
            method: record.method,
            tool: record.tool.as_deref().and_then(ToolName::parse),
            outcome,
            error_code: record.error_code,
            error_kind: record.error_kind,
            request_bytes: record.request_bytes,
            response_bytes,
        };
        self.metrics.record_request(event.clone());
        self.metrics.record_latency(event, latency);
    }
}

// ============================================================================
// SECTION: Line Framing
// ============================================================================

/// Result of reading one newline-delimited line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineRead {
    /// End of input with no pending bytes.
    Eof,
    /// A line within the limit is in the buffer.
    Line,
    /// A line of the given size exceeded the limit and was discarded.
    Oversized(usize),
}

/// Reads one line into `line`, discarding content beyond `limit` bytes.
fn read_line_bounded<R: BufRead>(
    reader: &mut R,
    limit: usize,
    line: &mut Vec<u8>,
) -> io::Result<LineRead> {
    line.clear();
    let mut total = 0_usize;
    let mut seen = false;
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(match (seen, total > limit) {
                (false, _) => LineRead::Eof,
                (true, true) => LineRead::Oversized(total),
                (true, false) => LineRead::Line,
            });
        }
        seen = true;
        let (chunk_len, consumed, done) = match available.iter().position(|byte| *byte == b'\n') {
            Some(index) => (index, index + 1, true),
            None => (available.len(), available.len(), false),
        };
        total = total.saturating_add(chunk_len);
        if total <= limit {
            line.extend_from_slice(&available[..chunk_len]);
        } else {
            line.clear();
        }
        reader.consume(consumed);
        if done {
            return Ok(if total > limit { LineRead::Oversized(total) } else { LineRead::Line });
        }
    }
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Shared session handle used by the HTTP transport.
pub type SharedSession = Arc<Mutex<Session>>;

/// Builds the HTTP router serving `POST /rpc`.
#[must_use]
pub fn http_router(session: SharedSession) -> Router {
    Router::new().route(RPC_ROUTE, post(handle_http)).with_state(session)
}

/// Handles one HTTP request body as one JSON-RPC envelope.
pub async fn handle_http(State(session): State<SharedSession>, body: Bytes) -> Response {
    let outcome = tokio::task::spawn_blocking(move || {
        let guard = session.lock();
        match guard {
            Ok(mut session) => session.handle_line(&body),
            Err(_) => Some(encode(&JsonRpcResponse::failure(
                Value::Null,
                RpcFailure::internal("lock", "session lock poisoned"),
            ))),
        }
    })
    .await;
    match outcome {
        Ok(Some(payload)) => json_response(payload),
        Ok(None) => StatusCode::ACCEPTED.into_response(),
        Err(_) => json_response(INTERNAL_ERROR_FALLBACK.to_string()),
    }
}

/// Serves the HTTP transport until the listener fails.
///
/// # Errors
///
/// Returns [`McpServerError::Transport`] when binding or serving fails.
pub async fn serve_http(session: Session, addr: SocketAddr) -> Result<(), McpServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| McpServerError::Transport(err.to_string()))?;
    let app = http_router(Arc::new(Mutex::new(session)));
    axum::serve(listener, app).await.map_err(|err| McpServerError::Transport(err.to_string()))
}

/// Wraps an encoded envelope in a JSON response.
fn json_response(payload: String) -> Response {
    (StatusCode::OK, [(CONTENT_TYPE, "application/json")], payload).into_response()
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Configured server ready to serve one transport.
pub struct McpServer {
    /// Selected transport.
    transport: ServerTransport,
    /// HTTP bind address.
    bind: Option<SocketAddr>,
    /// Session served by the transport.
    session: Session,
}

impl McpServer {
    /// Builds a server whose backend is the configured fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when configuration is invalid or the
    /// fixture file cannot be loaded.
    pub fn from_config(config: &TradeGateConfig) -> Result<Self, McpServerError> {
        let path = config.backend.fixtures.as_deref().ok_or_else(|| {
            McpServerError::Init("backend.fixtures must name a fixture file".to_string())
        })?;
        let backend = FixtureBackend::load(Path::new(path))
            .map_err(|err| McpServerError::Init(err.to_string()))?;
        Self::from_parts(config, Arc::new(backend))
    }

    /// Builds a server around an explicit backend.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when configuration is invalid or the audit
    /// sink cannot be opened.
    pub fn from_parts(
        config: &TradeGateConfig,
        backend: Arc<dyn MarketBackend>,
    ) -> Result<Self, McpServerError> {
        config.validate().map_err(|err| McpServerError::Config(err.to_string()))?;
        let hours = config
            .market_hours
            .market_hours()
            .map_err(|err| McpServerError::Config(err.to_string()))?;
        let router = ToolRouter::new(RiskPipeline::new(config.risk.limits(), hours));
        let server = &config.server;
        let bind = match server.transport {
            ServerTransport::Http => {
                Some(server.bind_addr().map_err(|err| McpServerError::Config(err.to_string()))?)
            }
            ServerTransport::Stdio => None,
        };
        let session = Session::new(router, ExecutionContext::new(backend))
            .with_server_name(server.name.clone())
            .with_max_line_bytes(server.max_line_bytes)
            .with_transport(server.transport)
            .with_audit(build_audit_sink(&server.audit)?);
        Ok(Self {
            transport: server.transport,
            bind,
            session,
        })
    }

    /// Returns the session.
    pub const fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Serves the configured transport until input ends or the transport fails.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError::Transport`] when the channel fails.
    pub async fn serve(self) -> Result<(), McpServerError> {
        match (self.transport, self.bind) {
            (ServerTransport::Http, Some(addr)) => serve_http(self.session, addr).await,
            (ServerTransport::Http, None) => {
                Err(McpServerError::Config("http transport requires bind address".to_string()))
            }
            (ServerTransport::Stdio, _) => {
                let mut session = self.session;
                tokio::task::spawn_blocking(move || {
                    let stdin = io::stdin();
                    let stdout = io::stdout();
                    session.serve_stdio(stdin.lock(), stdout.lock())
                })
                .await
                .map_err(|err| McpServerError::Transport(err.to_string()))?
            }
        }
    }
}

/// Builds the audit sink selected by configuration.
fn build_audit_sink(config: &AuditConfig) -> Result<Arc<dyn McpAuditSink>, McpServerError> {
    if !config.enabled {
        return Ok(Arc::new(McpNoopAuditSink));
    }
    match &config.path {
        Some(path) => McpFileAuditSink::new(Path::new(path))
            .map(|sink| Arc::new(sink) as Arc<dyn McpAuditSink>)
            .map_err(|err| McpServerError::Init(format!("audit log {path}: {err}"))),
        None => Ok(Arc::new(McpStderrAuditSink)),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Records a failure and builds its response.
fn fail(record: &mut RequestRecord, id: Value, failure: RpcFailure) -> JsonRpcResponse {
    record.fail(&failure);
    JsonRpcResponse::failure(id, failure)
}

/// Builds a parse error carrying the parser message.
fn parse_error(message: &str) -> RpcFailure {
    RpcFailure {
        data: Some(Value::String(message.to_string())),
        ..RpcFailure::new(PARSE_ERROR_CODE, "Parse error", "parse_error")
    }
}

/// Builds an invalid request error.
fn invalid_request() -> RpcFailure {
    RpcFailure::new(INVALID_REQUEST_CODE, "Invalid Request", "invalid_request")
}

/// Renders a request id for audit logs.
fn render_id(id: &Value) -> String {
    match id {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Encodes a response envelope.
fn encode(response: &JsonRpcResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| INTERNAL_ERROR_FALLBACK.to_string())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
