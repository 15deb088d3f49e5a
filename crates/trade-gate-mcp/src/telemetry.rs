// crates/trade-gate-mcp/src/telemetry.rs
// ============================================================================
// Module: Trade Gate Telemetry
// Description: Metric events for JSON-RPC requests and trading tool calls.
// Purpose: Label each request by method, tool family, and outcome.
// Dependencies: trade-gate-config, trade-gate-contract
// ============================================================================

//! ## Overview
//! Every handled line produces one [`McpMetricEvent`], recorded once as a
//! counter and once with its latency. Tool calls are labelled with their
//! [`ToolFamily`] so market-data reads, order intents, and subscription
//! changes can be told apart without parsing tool names. Hosts plug in an
//! exporter by implementing [`McpMetrics`]; the server defaults to
//! [`NoopMetrics`].
//! Security posture: labels carry tool names and error kinds only, never
//! symbols, quantities, or prices.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Serialize;
use trade_gate_config::ServerTransport;
use trade_gate_contract::ToolName;

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// JSON-RPC method classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum McpMethod {
    /// JSON-RPC initialize.
    Initialize,
    /// Initialized notification.
    Initialized,
    /// JSON-RPC tools/list.
    ToolsList,
    /// JSON-RPC tools/call.
    ToolsCall,
    /// Invalid or malformed JSON-RPC request.
    Invalid,
    /// Unsupported JSON-RPC method.
    Other,
}

impl McpMethod {
    /// Classifies a method name.
    #[must_use]
    pub fn from_name(method: &str) -> Self {
        match method {
            "initialize" => Self::Initialize,
            "initialized" | "notifications/initialized" => Self::Initialized,
            "tools/list" => Self::ToolsList,
            "tools/call" => Self::ToolsCall,
            _ => Self::Other,
        }
    }

    /// Returns a stable label for the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Initialized => "initialized",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::Invalid => "invalid",
            Self::Other => "other",
        }
    }
}

/// Tool grouping used as a low-cardinality metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToolFamily {
    /// Instrument lookup and market-data reads.
    Instrument,
    /// Expiries, chains, and option selection.
    Option,
    /// Equity and option order intents.
    OrderIntent,
    /// Holdings, positions, funds, and books.
    Portfolio,
    /// Live-feed subscription bookkeeping.
    Stream,
}

impl ToolFamily {
    /// Returns the family a tool belongs to.
    #[must_use]
    pub const fn of(tool: ToolName) -> Self {
        match tool {
            ToolName::InstrumentFind
            | ToolName::InstrumentInfo
            | ToolName::InstrumentLtp
            | ToolName::InstrumentQuote
            | ToolName::InstrumentOhlc
            | ToolName::InstrumentDaily
            | ToolName::InstrumentIntraday => Self::Instrument,
            ToolName::OptionExpiries | ToolName::OptionChain | ToolName::OptionSelect => {
                Self::Option
            }
            ToolName::OptionPrepare | ToolName::OrdersPrepare => Self::OrderIntent,
            ToolName::PortfolioHoldings
            | ToolName::PortfolioPositions
            | ToolName::PortfolioFunds
            | ToolName::PortfolioOrders
            | ToolName::PortfolioTrades => Self::Portfolio,
            ToolName::StreamSubscribe | ToolName::StreamUnsubscribe | ToolName::StreamStatus => {
                Self::Stream
            }
        }
    }

    /// Returns a stable label for the family.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instrument => "instrument",
            Self::Option => "option",
            Self::OrderIntent => "order_intent",
            Self::Portfolio => "portfolio",
            Self::Stream => "stream",
        }
    }
}

/// Request outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum McpOutcome {
    /// Successful request.
    Ok,
    /// Failed request.
    Error,
}

impl McpOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// Request metric event payload.
///
/// # Invariants
/// - Optional fields are `None` when the metadata is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpMetricEvent {
    /// Transport used for the request.
    pub transport: ServerTransport,
    /// JSON-RPC method classification.
    pub method: McpMethod,
    /// Tool name when available (tools/call).
    pub tool: Option<ToolName>,
    /// Request outcome.
    pub outcome: McpOutcome,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// Request size in bytes.
    pub request_bytes: usize,
    /// Response size in bytes.
    pub response_bytes: usize,
}

impl McpMetricEvent {
    /// Returns the family of the called tool, when the request named a known one.
    #[must_use]
    pub fn tool_family(&self) -> Option<ToolFamily> {
        self.tool.map(ToolFamily::of)
    }

    /// Returns true when a risk check blocked an order intent.
    #[must_use]
    pub fn is_risk_rejection(&self) -> bool {
        self.error_kind == Some("risk_violation")
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for requests and latencies.
pub trait McpMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: McpMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: McpMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are discarded.
pub struct NoopMetrics;

impl McpMetrics for NoopMetrics {
    fn record_request(&self, _event: McpMetricEvent) {}

    fn record_latency(&self, _event: McpMetricEvent, _latency: Duration) {}
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

    use trade_gate_config::ServerTransport;
    use trade_gate_contract::ToolName;

    use super::McpMethod;
    use super::McpMetricEvent;
    use super::McpOutcome;
    use super::ToolFamily;

    /// Builds a failed `tools/call` event for `tool`.
    fn failed_call(tool: Option<ToolName>, error_kind: &'static str) -> McpMetricEvent {
        McpMetricEvent {
            transport: ServerTransport::Stdio,
            method: McpMethod::ToolsCall,
            tool,
            outcome: McpOutcome::Error,
            error_code: Some(-32000),
            error_kind: Some(error_kind),
            request_bytes: 64,
            response_bytes: 96,
        }
    }

    #[test]
    fn method_names_classify_with_notification_alias() {
        assert_eq!(McpMethod::from_name("notifications/initialized"), McpMethod::Initialized);
        assert_eq!(McpMethod::from_name("initialized").as_str(), "initialized");
        assert_eq!(McpMethod::from_name("resources/list"), McpMethod::Other);
        assert_eq!(McpMethod::from_name(""), McpMethod::Other);
    }

    #[test]
    fn tool_family_follows_the_name_prefix() {
        for tool in ToolName::all() {
            let prefix = tool.as_str().split('.').next().unwrap();
            let family = ToolFamily::of(*tool);
            match prefix {
                "orders" => assert_eq!(family, ToolFamily::OrderIntent),
                "option" if *tool == ToolName::OptionPrepare => {
                    assert_eq!(family, ToolFamily::OrderIntent);
                }
                other => assert_eq!(family.as_str(), other, "{tool}"),
            }
        }
    }

    #[test]
    fn risk_rejections_are_flagged_on_order_intents() {
        let event = failed_call(Some(ToolName::OrdersPrepare), "risk_violation");
        assert!(event.is_risk_rejection());
        assert_eq!(event.tool_family(), Some(ToolFamily::OrderIntent));
        let event = failed_call(None, "unknown_tool");
        assert!(!event.is_risk_rejection());
        assert_eq!(event.tool_family(), None);
    }
}
