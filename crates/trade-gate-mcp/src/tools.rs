// crates/trade-gate-mcp/src/tools.rs
// ============================================================================
// Module: Tool Router
// Description: Static dispatch from tool names to trading capability handlers.
// Purpose: Validate, risk-check, and execute tool calls against the backend.
// Dependencies: trade-gate-contract, trade-gate-core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The router resolves a dotted tool name through [`ToolName::parse`], runs
//! argument validation, and hands the argument map to the matching handler.
//! Read tools pass backend payloads through unchanged. The two mutating tools
//! load a fresh instrument snapshot, run the risk pipeline, and build a
//! [`TradeIntent`] from the resulting clearance. Nothing is ever submitted.
//! Security posture: arguments are untrusted; handlers run only after
//! validation succeeds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use trade_gate_contract::ToolDefinition;
use trade_gate_contract::ToolName;
use trade_gate_contract::tool_definitions;
use trade_gate_core::Arguments;
use trade_gate_core::BackendError;
use trade_gate_core::EquityOrder;
use trade_gate_core::ExecutionContext;
use trade_gate_core::FeedType;
use trade_gate_core::InstrumentSnapshot;
use trade_gate_core::IntentError;
use trade_gate_core::OptionContract;
use trade_gate_core::OptionOrder;
use trade_gate_core::OptionType;
use trade_gate_core::RiskKind;
use trade_gate_core::RiskPipeline;
use trade_gate_core::RiskViolation;
use trade_gate_core::StreamInstrument;
use trade_gate_core::SubscriptionId;
use trade_gate_core::TradeIntent;
use trade_gate_core::arguments::f64_arg;
use trade_gate_core::arguments::i64_arg;
use trade_gate_core::arguments::str_arg;

use crate::validation::ValidationError;
use crate::validation::validate_tool;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON-RPC code for tool execution failures.
pub const TOOL_ERROR_CODE: i64 = -32000;
/// JSON-RPC code for internal errors.
pub const INTERNAL_ERROR_CODE: i64 = -32603;

/// Default maximum strike distance from spot, in percent.
const DEFAULT_MAX_DISTANCE_PCT: f64 = 1.0;
/// Default minimum option premium.
const DEFAULT_MIN_PREMIUM: f64 = 50.0;
/// Default maximum option premium.
const DEFAULT_MAX_PREMIUM: f64 = 300.0;
/// Number of strikes returned by `option.select`.
const SELECTION_LIMIT: usize = 3;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Tool execution failures.
///
/// # Invariants
/// - Each variant maps to one fixed JSON-RPC code and error kind label.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// The tool name is not in the catalog.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// Arguments failed validation or referenced unknown state.
    #[error("{message}")]
    InvalidArguments {
        /// Caller-facing summary.
        message: String,
        /// Structured details, usually a field to message map.
        details: Value,
    },
    /// A risk check blocked the intent.
    #[error("{0}")]
    RiskViolation(String),
    /// The backend failed.
    #[error("backend error: {0}")]
    Backend(String),
    /// An invariant inside the server failed.
    #[error("internal error: {0}")]
    Internal(String),
    /// A handler result could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ToolError {
    /// Returns the stable error kind label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidArguments {
                ..
            } => "invalid_arguments",
            Self::RiskViolation(_) => "risk_violation",
            Self::Backend(_) => "backend",
            Self::Internal(_) => "internal",
            Self::Serialization(_) => "serialization",
        }
    }

    /// Returns the JSON-RPC error code.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::UnknownTool(_)
            | Self::InvalidArguments {
                ..
            }
            | Self::RiskViolation(_) => TOOL_ERROR_CODE,
            Self::Backend(_) | Self::Internal(_) | Self::Serialization(_) => INTERNAL_ERROR_CODE,
        }
    }

    /// Returns the JSON-RPC error message.
    #[must_use]
    pub fn rpc_message(&self) -> String {
        match self {
            Self::UnknownTool(_)
            | Self::InvalidArguments {
                ..
            }
            | Self::RiskViolation(_) => self.to_string(),
            Self::Backend(_) | Self::Internal(_) | Self::Serialization(_) => {
                "Internal error".to_string()
            }
        }
    }

    /// Returns the JSON-RPC error data payload.
    #[must_use]
    pub fn rpc_data(&self) -> Value {
        match self {
            Self::UnknownTool(tool) => json!({"kind": self.kind(), "tool": tool}),
            Self::InvalidArguments {
                details, ..
            } => json!({"kind": self.kind(), "details": details}),
            Self::RiskViolation(reason) => json!({"kind": self.kind(), "reason": reason}),
            Self::Backend(message) | Self::Internal(message) | Self::Serialization(message) => {
                json!({"kind": self.kind(), "message": message})
            }
        }
    }
}

impl From<ValidationError> for ToolError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::UnknownTool(name) => Self::UnknownTool(name),
            ValidationError::InvalidArguments {
                tool,
                errors,
            } => Self::InvalidArguments {
                message: format!("Invalid arguments for {tool}"),
                details: json!(errors),
            },
        }
    }
}

impl From<RiskViolation> for ToolError {
    fn from(violation: RiskViolation) -> Self {
        Self::RiskViolation(violation.reason().to_string())
    }
}

impl From<BackendError> for ToolError {
    fn from(error: BackendError) -> Self {
        Self::Backend(error.to_string())
    }
}

impl From<IntentError> for ToolError {
    fn from(error: IntentError) -> Self {
        Self::Internal(error.to_string())
    }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Tool router bound to one risk pipeline.
///
/// # Invariants
/// - Every catalog tool has exactly one handler arm.
/// - Mutating tools never return an intent without a pipeline clearance.
pub struct ToolRouter {
    /// Risk pipeline applied to mutating tools.
    pipeline: RiskPipeline,
}

impl Default for ToolRouter {
    fn default() -> Self {
        Self::new(RiskPipeline::default())
    }
}

impl ToolRouter {
    /// Creates a router with the provided pipeline.
    #[must_use]
    pub const fn new(pipeline: RiskPipeline) -> Self {
        Self {
            pipeline,
        }
    }

    /// Returns the risk pipeline.
    #[must_use]
    pub const fn pipeline(&self) -> &RiskPipeline {
        &self.pipeline
    }

    /// Returns the tool catalog.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    /// Validates and executes one tool call.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] when the tool is unknown, arguments are invalid,
    /// a risk check fails, or the backend fails.
    pub fn handle_tool_call(
        &self,
        context: &mut ExecutionContext,
        name: &str,
        args: &Value,
    ) -> Result<Value, ToolError> {
        let tool = ToolName::parse(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let args = validate_tool(tool, args)?;
        self.dispatch(context, tool, args)
    }

    /// Runs the handler bound to `tool`.
    fn dispatch(
        &self,
        context: &mut ExecutionContext,
        tool: ToolName,
        args: &Arguments,
    ) -> Result<Value, ToolError> {
        match tool {
            ToolName::InstrumentFind => instrument_find(context, args),
            ToolName::InstrumentInfo => instrument_info(context, args),
            ToolName::InstrumentLtp => {
                let instrument = lookup(context, args)?;
                Ok(context.backend().ltp(&instrument)?)
            }
            ToolName::InstrumentQuote => {
                let instrument = lookup(context, args)?;
                Ok(context.backend().quote(&instrument)?)
            }
            ToolName::InstrumentOhlc => {
                let instrument = lookup(context, args)?;
                Ok(context.backend().ohlc(&instrument)?)
            }
            ToolName::InstrumentDaily => {
                let instrument = lookup(context, args)?;
                let from = required_str(args, "from")?;
                let to = required_str(args, "to")?;
                Ok(context.backend().daily(&instrument, from, to)?)
            }
            ToolName::InstrumentIntraday => {
                let instrument = lookup(context, args)?;
                let from = required_str(args, "from")?;
                let to = required_str(args, "to")?;
                let interval = required_str(args, "interval")?;
                Ok(context.backend().intraday(&instrument, from, to, interval)?)
            }
            ToolName::OptionExpiries => {
                let instrument = lookup(context, args)?;
                to_value(&context.backend().expiry_list(&instrument)?)
            }
            ToolName::OptionChain => {
                let instrument = lookup(context, args)?;
                let expiry = required_str(args, "expiry")?;
                to_value(&context.backend().option_chain(&instrument, expiry)?)
            }
            ToolName::OptionSelect => option_select(context, args),
            ToolName::OptionPrepare => self.option_prepare(context, args),
            ToolName::OrdersPrepare => self.orders_prepare(context, args),
            ToolName::PortfolioHoldings => Ok(context.backend().holdings()?),
            ToolName::PortfolioPositions => Ok(context.backend().positions()?),
            ToolName::PortfolioFunds => Ok(context.backend().funds()?),
            ToolName::PortfolioOrders => Ok(context.backend().order_book()?),
            ToolName::PortfolioTrades => Ok(context.backend().trade_book()?),
            ToolName::StreamSubscribe => stream_subscribe(context, args),
            ToolName::StreamUnsubscribe => stream_unsubscribe(context, args),
            ToolName::StreamStatus => to_value(context.subscriptions().all()),
        }
    }

    /// Prepares an options BUY intent.
    fn option_prepare(
        &self,
        context: &ExecutionContext,
        args: &Arguments,
    ) -> Result<Value, ToolError> {
        let instrument = lookup(context, args)?;
        let clearance = self.pipeline.run(context, args, &instrument, RiskKind::Options)?;
        let order = OptionOrder {
            symbol: instrument.symbol,
            security_id: required_str(args, "security_id")?.to_string(),
            strike: required_f64(args, "strike")?,
            option_type: required_str(args, "option_type")?.to_string(),
            expiry: required_str(args, "expiry")?.to_string(),
            quantity: required_i64(args, "quantity")?,
            stop_loss: f64_arg(args, "stop_loss"),
            target: f64_arg(args, "target"),
        };
        to_value(&TradeIntent::options(clearance, order)?)
    }

    /// Prepares an equity or futures intent.
    fn orders_prepare(
        &self,
        context: &ExecutionContext,
        args: &Arguments,
    ) -> Result<Value, ToolError> {
        let instrument = lookup(context, args)?;
        let clearance = self.pipeline.run(context, args, &instrument, RiskKind::Equity)?;
        let order = EquityOrder {
            symbol: instrument.symbol,
            exchange_segment: instrument.exchange_segment,
            transaction_type: required_str(args, "transaction_type")?.to_string(),
            quantity: required_i64(args, "quantity")?,
            order_type: required_str(args, "order_type")?.to_string(),
            product_type: required_str(args, "product_type")?.to_string(),
            price: f64_arg(args, "price"),
            stop_loss: f64_arg(args, "stop_loss"),
            target: f64_arg(args, "target"),
        };
        to_value(&TradeIntent::equity(clearance, order)?)
    }
}

// ============================================================================
// SECTION: Instrument Handlers
// ============================================================================

/// Returns the identity fields of an instrument.
fn instrument_find(context: &ExecutionContext, args: &Arguments) -> Result<Value, ToolError> {
    let instrument = lookup(context, args)?;
    Ok(json!({
        "security_id": instrument.security_id,
        "symbol": instrument.symbol,
        "display_name": instrument.display_name,
        "underlying_symbol": instrument.underlying_symbol,
        "exchange_segment": instrument.exchange_segment,
        "segment": instrument.segment,
        "instrument": instrument.instrument,
        "instrument_type": instrument.instrument_type,
        "expiry_flag": instrument.expiry_flag,
    }))
}

/// Returns permission and margin metadata of an instrument.
fn instrument_info(context: &ExecutionContext, args: &Arguments) -> Result<Value, ToolError> {
    let instrument = lookup(context, args)?;
    Ok(json!({
        "isin": instrument.isin,
        "trading_allowed": instrument.trading_allowed,
        "bracket_supported": instrument.bracket_supported,
        "cover_supported": instrument.cover_supported,
        "asm_gsm_status": instrument.asm_gsm_status(),
        "mtf_leverage": instrument.mtf_leverage,
        "buy_margin_pct": instrument.buy_margin_pct,
        "sell_margin_pct": instrument.sell_margin_pct,
    }))
}

// ============================================================================
// SECTION: Option Selection
// ============================================================================

/// Picks the strikes closest to spot that satisfy distance and premium bands.
fn option_select(context: &ExecutionContext, args: &Arguments) -> Result<Value, ToolError> {
    let instrument = lookup(context, args)?;
    let expiry = required_str(args, "expiry")?;
    let side = match required_str(args, "direction")? {
        "BULLISH" => OptionType::Call,
        _ => OptionType::Put,
    };
    let spot = match context.meta().spot_price {
        Some(spot) => spot,
        None => required_f64(args, "spot_price")?,
    };
    if !spot.is_finite() || spot <= 0.0 {
        return Err(ToolError::InvalidArguments {
            message: "Invalid arguments for option.select".to_string(),
            details: json!({"spot_price": "must be positive"}),
        });
    }
    let band = SelectionBand {
        max_distance_pct: f64_arg(args, "max_distance_pct").unwrap_or(DEFAULT_MAX_DISTANCE_PCT),
        min_premium: f64_arg(args, "min_premium").unwrap_or(DEFAULT_MIN_PREMIUM),
        max_premium: f64_arg(args, "max_premium").unwrap_or(DEFAULT_MAX_PREMIUM),
    };
    let chain = context.backend().option_chain(&instrument, expiry)?;
    let picks: Vec<Value> = select_strikes(&chain, side, spot, &band)
        .into_iter()
        .map(|contract| {
            json!({
                "security_id": contract.security_id,
                "strike": contract.strike,
                "option_type": contract.option_type,
                "ltp": contract.ltp,
                "distance_from_spot": round2(contract.strike - spot),
            })
        })
        .collect();
    Ok(Value::Array(picks))
}

/// Distance and premium limits for strike selection.
struct SelectionBand {
    /// Maximum distance from spot, in percent of spot.
    max_distance_pct: f64,
    /// Minimum acceptable premium.
    min_premium: f64,
    /// Maximum acceptable premium.
    max_premium: f64,
}

/// Filters `chain` to `side` within `band`, nearest strikes first.
fn select_strikes<'a>(
    chain: &'a [OptionContract],
    side: OptionType,
    spot: f64,
    band: &SelectionBand,
) -> Vec<&'a OptionContract> {
    let mut picks: Vec<&OptionContract> = chain
        .iter()
        .filter(|contract| contract.option_type == side)
        .filter(|contract| {
            (contract.strike - spot).abs() / spot * 100.0 <= band.max_distance_pct
        })
        .filter(|contract| contract.ltp >= band.min_premium && contract.ltp <= band.max_premium)
        .collect();
    picks.sort_by(|a, b| (a.strike - spot).abs().total_cmp(&(b.strike - spot).abs()));
    picks.truncate(SELECTION_LIMIT);
    picks
}

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// SECTION: Stream Handlers
// ============================================================================

/// Registers a market-data subscription.
fn stream_subscribe(context: &mut ExecutionContext, args: &Arguments) -> Result<Value, ToolError> {
    let instrument = lookup(context, args)?;
    let label = required_str(args, "feed_type")?;
    let feed_type = FeedType::parse(label).ok_or_else(|| ToolError::InvalidArguments {
        message: "Invalid arguments for stream.subscribe".to_string(),
        details: json!({"feed_type": "must be one of LTP, QUOTE, FULL"}),
    })?;
    let now = context.now();
    let symbol = instrument.symbol.clone();
    let id = context.subscriptions_mut().add_at(
        StreamInstrument {
            exchange_segment: instrument.exchange_segment,
            security_id: instrument.security_id,
            symbol: instrument.symbol,
        },
        feed_type,
        now,
    );
    Ok(json!({
        "subscription_id": id,
        "instrument": symbol,
        "feed_type": feed_type.as_str(),
        "status": "subscribed",
    }))
}

/// Removes a market-data subscription.
fn stream_unsubscribe(
    context: &mut ExecutionContext,
    args: &Arguments,
) -> Result<Value, ToolError> {
    let id = SubscriptionId::new(required_str(args, "subscription_id")?);
    if !context.subscriptions_mut().remove(&id) {
        return Err(ToolError::InvalidArguments {
            message: "Unknown subscription".to_string(),
            details: json!({"subscription_id": id}),
        });
    }
    Ok(json!({
        "subscription_id": id,
        "status": "unsubscribed",
    }))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads a fresh snapshot for the `exchange_segment` and `symbol` arguments.
fn lookup(context: &ExecutionContext, args: &Arguments) -> Result<InstrumentSnapshot, ToolError> {
    let exchange_segment = required_str(args, "exchange_segment")?;
    let symbol = required_str(args, "symbol")?;
    Ok(context.backend().find_instrument(exchange_segment, symbol)?)
}

/// Reads a validated string argument.
fn required_str<'a>(args: &'a Arguments, key: &str) -> Result<&'a str, ToolError> {
    str_arg(args, key).ok_or_else(|| missing(key))
}

/// Reads a validated number argument.
fn required_f64(args: &Arguments, key: &str) -> Result<f64, ToolError> {
    f64_arg(args, key).ok_or_else(|| missing(key))
}

/// Reads a validated integer argument.
fn required_i64(args: &Arguments, key: &str) -> Result<i64, ToolError> {
    i64_arg(args, key).ok_or_else(|| missing(key))
}

/// Error for an argument that passed validation but cannot be read.
fn missing(key: &str) -> ToolError {
    let mut details = Map::new();
    details.insert(key.to_string(), Value::String("is out of range".to_string()));
    ToolError::InvalidArguments {
        message: format!("Argument {key} is out of range"),
        details: Value::Object(details),
    }
}

/// Serializes a handler result.
fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|err| ToolError::Serialization(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
