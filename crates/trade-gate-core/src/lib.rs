// crates/trade-gate-core/src/lib.rs
// ============================================================================
// Module: Trade Gate Core Library
// Description: Public API surface for the Trade Gate core.
// Purpose: Expose instrument models, backend interfaces, and the risk pipeline.
// Dependencies: crate::{arguments, backend, context, instrument, intent, risk, stream}
// ============================================================================

//! ## Overview
//! Trade Gate core holds the domain model behind the MCP tool surface:
//! instrument snapshots supplied by an external broker backend, the
//! per-session execution context, the ordered compliance pipeline that gates
//! every trade intent, and the in-memory market-data subscription registry.
//! Nothing in this crate submits orders; intents are proposals for a human.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod arguments;
pub mod backend;
pub mod context;
pub mod instrument;
pub mod intent;
pub mod risk;
pub mod stream;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use arguments::Arguments;
pub use backend::BackendError;
pub use backend::MarketBackend;
pub use context::ContextMeta;
pub use context::ExecutionContext;
pub use instrument::InstrumentSnapshot;
pub use instrument::OptionContract;
pub use instrument::OptionType;
pub use intent::EquityOrder;
pub use intent::IntentError;
pub use intent::OptionOrder;
pub use intent::TradeIntent;
pub use intent::TradeType;
pub use risk::MarketHours;
pub use risk::RiskCheck;
pub use risk::RiskClearance;
pub use risk::RiskInput;
pub use risk::RiskKind;
pub use risk::RiskLimits;
pub use risk::RiskPipeline;
pub use risk::RiskViolation;
pub use stream::FeedType;
pub use stream::StreamInstrument;
pub use stream::SubscriptionId;
pub use stream::SubscriptionRecord;
pub use stream::SubscriptionRegistry;
