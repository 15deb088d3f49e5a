// crates/trade-gate-contract/src/tooling.rs
// ============================================================================
// Module: Tool Contracts
// Description: Canonical tool identifiers and the static schema catalog.
// Purpose: Single source of truth for tool listing and argument validation.
// Dependencies: crate::schema, serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines the canonical Trade Gate tool surface. Tool names are
//! part of the external contract; the catalog drives both `tools/list` and the
//! argument validator.
//! Security posture: tool inputs are untrusted; every mutating tool rejects
//! keys it does not declare.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde_json::json;

use crate::schema::Schema;

// ============================================================================
// SECTION: Tool Names
// ============================================================================

/// Canonical tool names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ToolName {
    /// Find a tradable instrument.
    #[serde(rename = "instrument.find")]
    InstrumentFind,
    /// Trading permissions and risk metadata.
    #[serde(rename = "instrument.info")]
    InstrumentInfo,
    /// Last traded price.
    #[serde(rename = "instrument.ltp")]
    InstrumentLtp,
    /// Market quote.
    #[serde(rename = "instrument.quote")]
    InstrumentQuote,
    /// Open/high/low/close.
    #[serde(rename = "instrument.ohlc")]
    InstrumentOhlc,
    /// Daily candles.
    #[serde(rename = "instrument.daily")]
    InstrumentDaily,
    /// Intraday candles.
    #[serde(rename = "instrument.intraday")]
    InstrumentIntraday,
    /// Option expiries for an underlying.
    #[serde(rename = "option.expiries")]
    OptionExpiries,
    /// Option chain for an expiry.
    #[serde(rename = "option.chain")]
    OptionChain,
    /// Rule-based strike selection.
    #[serde(rename = "option.select")]
    OptionSelect,
    /// Prepare an options buy intent.
    #[serde(rename = "option.prepare")]
    OptionPrepare,
    /// Prepare an equity/futures intent.
    #[serde(rename = "orders.prepare")]
    OrdersPrepare,
    /// Portfolio holdings.
    #[serde(rename = "portfolio.holdings")]
    PortfolioHoldings,
    /// Open positions.
    #[serde(rename = "portfolio.positions")]
    PortfolioPositions,
    /// Available funds.
    #[serde(rename = "portfolio.funds")]
    PortfolioFunds,
    /// Order book.
    #[serde(rename = "portfolio.orders")]
    PortfolioOrders,
    /// Trade book.
    #[serde(rename = "portfolio.trades")]
    PortfolioTrades,
    /// Register a market-data subscription.
    #[serde(rename = "stream.subscribe")]
    StreamSubscribe,
    /// Remove a market-data subscription.
    #[serde(rename = "stream.unsubscribe")]
    StreamUnsubscribe,
    /// List market-data subscriptions.
    #[serde(rename = "stream.status")]
    StreamStatus,
}

impl ToolName {
    /// Returns the canonical string name for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InstrumentFind => "instrument.find",
            Self::InstrumentInfo => "instrument.info",
            Self::InstrumentLtp => "instrument.ltp",
            Self::InstrumentQuote => "instrument.quote",
            Self::InstrumentOhlc => "instrument.ohlc",
            Self::InstrumentDaily => "instrument.daily",
            Self::InstrumentIntraday => "instrument.intraday",
            Self::OptionExpiries => "option.expiries",
            Self::OptionChain => "option.chain",
            Self::OptionSelect => "option.select",
            Self::OptionPrepare => "option.prepare",
            Self::OrdersPrepare => "orders.prepare",
            Self::PortfolioHoldings => "portfolio.holdings",
            Self::PortfolioPositions => "portfolio.positions",
            Self::PortfolioFunds => "portfolio.funds",
            Self::PortfolioOrders => "portfolio.orders",
            Self::PortfolioTrades => "portfolio.trades",
            Self::StreamSubscribe => "stream.subscribe",
            Self::StreamUnsubscribe => "stream.unsubscribe",
            Self::StreamStatus => "stream.status",
        }
    }

    /// Returns all tool names in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::InstrumentFind,
            Self::InstrumentInfo,
            Self::InstrumentLtp,
            Self::InstrumentQuote,
            Self::InstrumentOhlc,
            Self::InstrumentDaily,
            Self::InstrumentIntraday,
            Self::OptionExpiries,
            Self::OptionChain,
            Self::OptionSelect,
            Self::OptionPrepare,
            Self::OrdersPrepare,
            Self::PortfolioHoldings,
            Self::PortfolioPositions,
            Self::PortfolioFunds,
            Self::PortfolioOrders,
            Self::PortfolioTrades,
            Self::StreamSubscribe,
            Self::StreamUnsubscribe,
            Self::StreamStatus,
        ]
    }

    /// Parses a tool name from its string representation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "instrument.find" => Some(Self::InstrumentFind),
            "instrument.info" => Some(Self::InstrumentInfo),
            "instrument.ltp" => Some(Self::InstrumentLtp),
            "instrument.quote" => Some(Self::InstrumentQuote),
            "instrument.ohlc" => Some(Self::InstrumentOhlc),
            "instrument.daily" => Some(Self::InstrumentDaily),
            "instrument.intraday" => Some(Self::InstrumentIntraday),
            "option.expiries" => Some(Self::OptionExpiries),
            "option.chain" => Some(Self::OptionChain),
            "option.select" => Some(Self::OptionSelect),
            "option.prepare" => Some(Self::OptionPrepare),
            "orders.prepare" => Some(Self::OrdersPrepare),
            "portfolio.holdings" => Some(Self::PortfolioHoldings),
            "portfolio.positions" => Some(Self::PortfolioPositions),
            "portfolio.funds" => Some(Self::PortfolioFunds),
            "portfolio.orders" => Some(Self::PortfolioOrders),
            "portfolio.trades" => Some(Self::PortfolioTrades),
            "stream.subscribe" => Some(Self::StreamSubscribe),
            "stream.unsubscribe" => Some(Self::StreamUnsubscribe),
            "stream.status" => Some(Self::StreamStatus),
            _ => None,
        }
    }

    /// Returns true when the tool produces a trade intent.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        matches!(self, Self::OptionPrepare | Self::OrdersPrepare)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tool Definitions
// ============================================================================

/// Tool definition used by tool listing and validation.
///
/// # Invariants
/// - `name` is a stable tool identifier.
/// - `input_schema` is an object schema describing the argument map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: ToolName,
    /// Tool description for clients.
    pub description: String,
    /// Argument schema.
    #[serde(rename = "inputSchema")]
    pub input_schema: Schema,
}

/// Returns the canonical tool catalog.
///
/// The order matches [`ToolName::all`]. Append new tools at the end of both.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    ToolName::all().iter().map(|name| tool_definition(*name)).collect()
}

/// Returns the definition for a single tool.
#[must_use]
pub fn tool_definition(name: ToolName) -> ToolDefinition {
    let (description, input_schema) = match name {
        ToolName::InstrumentFind => ("Find tradable instrument", instrument_schema()),
        ToolName::InstrumentInfo => ("Trading permissions and risk metadata", instrument_schema()),
        ToolName::InstrumentLtp => ("Last traded price for an instrument", instrument_schema()),
        ToolName::InstrumentQuote => ("Market quote for an instrument", instrument_schema()),
        ToolName::InstrumentOhlc => {
            ("Open, high, low and close for an instrument", instrument_schema())
        }
        ToolName::InstrumentDaily => ("Daily candles between two dates", candle_schema(false)),
        ToolName::InstrumentIntraday => {
            ("Intraday candles between two dates at an interval", candle_schema(true))
        }
        ToolName::OptionExpiries => {
            ("Get available option expiries for an index instrument", instrument_schema())
        }
        ToolName::OptionChain => {
            ("Fetch option chain for an expiry via Instrument", chain_schema())
        }
        ToolName::OptionSelect => {
            ("Rule-based CE/PE strike selection (no prediction)", option_select_schema())
        }
        ToolName::OptionPrepare => {
            ("Prepare an OPTIONS BUY trade intent (no execution)", option_prepare_schema())
        }
        ToolName::OrdersPrepare => {
            ("Prepare an equity/futures trade intent (no execution)", orders_prepare_schema())
        }
        ToolName::PortfolioHoldings => ("Current holdings", empty_schema()),
        ToolName::PortfolioPositions => ("Open positions", empty_schema()),
        ToolName::PortfolioFunds => ("Available funds and margin", empty_schema()),
        ToolName::PortfolioOrders => ("Order book for the day", empty_schema()),
        ToolName::PortfolioTrades => ("Trade book for the day", empty_schema()),
        ToolName::StreamSubscribe => {
            ("Register a live market-data subscription", stream_subscribe_schema())
        }
        ToolName::StreamUnsubscribe => {
            ("Remove a live market-data subscription", stream_unsubscribe_schema())
        }
        ToolName::StreamStatus => ("List active market-data subscriptions", empty_schema()),
    };
    ToolDefinition {
        name,
        description: description.to_string(),
        input_schema,
    }
}

// ============================================================================
// SECTION: Input Schemas
// ============================================================================

/// Schema for tools addressed by exchange segment and symbol.
fn instrument_schema() -> Schema {
    Schema::object()
        .property("exchange_segment", Schema::string().describe("Exchange segment code"))
        .property("symbol", Schema::string().describe("Trading symbol"))
        .require(&["exchange_segment", "symbol"])
}

/// Schema for historical candle tools.
fn candle_schema(intraday: bool) -> Schema {
    let schema = instrument_schema()
        .property("from", Schema::string().describe("Start date (YYYY-MM-DD)"))
        .property("to", Schema::string().describe("End date (YYYY-MM-DD)"))
        .require(&["from", "to"]);
    if intraday {
        schema
            .property("interval", Schema::string().describe("Candle interval in minutes"))
            .require(&["interval"])
    } else {
        schema
    }
}

/// Schema for `option.chain`.
fn chain_schema() -> Schema {
    instrument_schema().property("expiry", Schema::string()).require(&["expiry"])
}

/// Schema for `option.select`.
fn option_select_schema() -> Schema {
    chain_schema()
        .property("direction", Schema::labels(&["BULLISH", "BEARISH"]))
        .property("spot_price", Schema::number())
        .property("max_distance_pct", Schema::number().with_default(json!(1.0)))
        .property("min_premium", Schema::number().with_default(json!(50)))
        .property("max_premium", Schema::number().with_default(json!(300)))
        .require(&["direction", "spot_price"])
}

/// Schema for `option.prepare`.
fn option_prepare_schema() -> Schema {
    Schema::object()
        .property("exchange_segment", Schema::string())
        .property("symbol", Schema::string())
        .property("security_id", Schema::string())
        .property("option_type", Schema::labels(&["CE", "PE"]))
        .property("strike", Schema::number())
        .property("expiry", Schema::string())
        .property("quantity", Schema::integer())
        .property("stop_loss", Schema::number())
        .property("target", Schema::number())
        .require(&[
            "exchange_segment",
            "symbol",
            "security_id",
            "option_type",
            "strike",
            "expiry",
            "quantity",
        ])
        .strict()
}

/// Schema for `orders.prepare`.
fn orders_prepare_schema() -> Schema {
    Schema::object()
        .property("exchange_segment", Schema::string())
        .property("symbol", Schema::string())
        .property("transaction_type", Schema::labels(&["BUY", "SELL"]))
        .property("quantity", Schema::integer())
        .property("order_type", Schema::string().describe("MARKET or LIMIT"))
        .property(
            "product_type",
            Schema::string().describe("Product code, for example CNC or INTRADAY"),
        )
        .property("price", Schema::number())
        .property("stop_loss", Schema::number())
        .property("target", Schema::number())
        .require(&[
            "exchange_segment",
            "symbol",
            "transaction_type",
            "quantity",
            "order_type",
            "product_type",
        ])
        .strict()
}

/// Schema for `stream.subscribe`.
fn stream_subscribe_schema() -> Schema {
    instrument_schema()
        .property("feed_type", Schema::labels(&["LTP", "QUOTE", "FULL"]))
        .require(&["feed_type"])
        .strict()
}

/// Schema for `stream.unsubscribe`.
fn stream_unsubscribe_schema() -> Schema {
    Schema::object()
        .property("subscription_id", Schema::string())
        .require(&["subscription_id"])
        .strict()
}

/// Schema for tools without arguments.
fn empty_schema() -> Schema {
    Schema::object()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
