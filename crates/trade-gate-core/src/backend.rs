// crates/trade-gate-core/src/backend.rs
// ============================================================================
// Module: Market Backend Interface
// Description: Backend-agnostic broker and market-data contract.
// Purpose: Define the external collaborator consumed by tool handlers.
// Dependencies: crate::instrument, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The broker backend supplies instrument metadata, market data, and portfolio
//! books. Calls are synchronous and blocking from the handler's perspective;
//! the core applies no timeout and never retries. Read-only payloads are
//! passed through as backend-shaped JSON.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::instrument::InstrumentSnapshot;
use crate::instrument::OptionContract;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Backend failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The requested instrument or record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The backend could not serve the request.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// SECTION: Market Backend
// ============================================================================

/// Broker and market-data backend.
pub trait MarketBackend: Send + Sync {
    /// Looks up an instrument by exchange segment and symbol.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the instrument cannot be resolved.
    fn find_instrument(
        &self,
        exchange_segment: &str,
        symbol: &str,
    ) -> Result<InstrumentSnapshot, BackendError>;

    /// Returns the last traded price payload for an instrument.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn ltp(&self, instrument: &InstrumentSnapshot) -> Result<Value, BackendError>;

    /// Returns the market quote payload for an instrument.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn quote(&self, instrument: &InstrumentSnapshot) -> Result<Value, BackendError>;

    /// Returns the OHLC payload for an instrument.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn ohlc(&self, instrument: &InstrumentSnapshot) -> Result<Value, BackendError>;

    /// Returns daily candles between two dates.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn daily(
        &self,
        instrument: &InstrumentSnapshot,
        from: &str,
        to: &str,
    ) -> Result<Value, BackendError>;

    /// Returns intraday candles between two dates at the given interval.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn intraday(
        &self,
        instrument: &InstrumentSnapshot,
        from: &str,
        to: &str,
        interval: &str,
    ) -> Result<Value, BackendError>;

    /// Returns the available option expiries for an underlying.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn expiry_list(&self, instrument: &InstrumentSnapshot) -> Result<Vec<String>, BackendError>;

    /// Returns the option chain for an underlying and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn option_chain(
        &self,
        instrument: &InstrumentSnapshot,
        expiry: &str,
    ) -> Result<Vec<OptionContract>, BackendError>;

    /// Returns current holdings.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn holdings(&self) -> Result<Value, BackendError>;

    /// Returns open positions.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn positions(&self) -> Result<Value, BackendError>;

    /// Returns available funds.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn funds(&self) -> Result<Value, BackendError>;

    /// Returns the order book.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn order_book(&self) -> Result<Value, BackendError>;

    /// Returns today's trade book.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend fails.
    fn trade_book(&self) -> Result<Value, BackendError>;
}
