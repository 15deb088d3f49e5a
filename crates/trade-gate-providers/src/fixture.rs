// crates/trade-gate-providers/src/fixture.rs
// ============================================================================
// Module: Fixture Market Backend
// Description: JSON-document backed implementation of `MarketBackend`.
// Purpose: Serve instruments, market data, and portfolio books deterministically.
// Dependencies: trade-gate-core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A fixture document lists instruments (snapshot fields plus canned market
//! data and option chains) and a portfolio section. The backend indexes
//! instruments by `(exchange_segment, symbol)` at load time and answers every
//! call from memory.
//! Security posture: fixture files are local operator input but are still
//! size-limited and parsed strictly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use trade_gate_core::BackendError;
use trade_gate_core::InstrumentSnapshot;
use trade_gate_core::MarketBackend;
use trade_gate_core::OptionContract;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum fixture file size in bytes.
const MAX_FIXTURE_FILE_SIZE: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Document Model
// ============================================================================

/// One instrument entry in a fixture document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixtureInstrument {
    /// Snapshot fields.
    #[serde(flatten)]
    pub snapshot: InstrumentSnapshot,
    /// Last traded price payload.
    #[serde(default)]
    pub ltp: Option<Value>,
    /// Quote payload.
    #[serde(default)]
    pub quote: Option<Value>,
    /// OHLC payload.
    #[serde(default)]
    pub ohlc: Option<Value>,
    /// Daily candle payload.
    #[serde(default)]
    pub daily: Option<Value>,
    /// Intraday candle payload.
    #[serde(default)]
    pub intraday: Option<Value>,
    /// Available option expiries.
    #[serde(default)]
    pub expiries: Vec<String>,
    /// Option chains keyed by expiry.
    #[serde(default)]
    pub option_chains: BTreeMap<String, Vec<OptionContract>>,
}

/// Portfolio books in a fixture document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixturePortfolio {
    /// Holdings payload.
    #[serde(default = "empty_list")]
    pub holdings: Value,
    /// Positions payload.
    #[serde(default = "empty_list")]
    pub positions: Value,
    /// Funds payload.
    #[serde(default = "empty_object")]
    pub funds: Value,
    /// Order book payload.
    #[serde(default = "empty_list")]
    pub orders: Value,
    /// Trade book payload.
    #[serde(default = "empty_list")]
    pub trades: Value,
}

impl Default for FixturePortfolio {
    fn default() -> Self {
        Self {
            holdings: empty_list(),
            positions: empty_list(),
            funds: empty_object(),
            orders: empty_list(),
            trades: empty_list(),
        }
    }
}

/// Complete fixture document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FixtureDocument {
    /// Instrument entries.
    #[serde(default)]
    pub instruments: Vec<FixtureInstrument>,
    /// Portfolio books.
    #[serde(default)]
    pub portfolio: FixturePortfolio,
}

/// Fixture loading errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    /// I/O failure while reading the fixture file.
    #[error("fixture io error: {0}")]
    Io(String),
    /// JSON parsing failure.
    #[error("fixture parse error: {0}")]
    Parse(String),
    /// Structurally invalid fixture content.
    #[error("invalid fixture: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Backend
// ============================================================================

/// In-memory market backend built from a fixture document.
///
/// # Invariants
/// - Each `(exchange_segment, symbol)` pair maps to exactly one instrument.
#[derive(Debug, Clone, Default)]
pub struct FixtureBackend {
    /// Instruments keyed by `(exchange_segment, symbol)`.
    instruments: BTreeMap<(String, String), FixtureInstrument>,
    /// Portfolio books.
    portfolio: FixturePortfolio,
}

impl FixtureBackend {
    /// Builds a backend from a parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Invalid`] when two instruments share a key.
    pub fn from_document(document: FixtureDocument) -> Result<Self, FixtureError> {
        let mut instruments = BTreeMap::new();
        for instrument in document.instruments {
            let key = (
                instrument.snapshot.exchange_segment.clone(),
                instrument.snapshot.symbol.clone(),
            );
            if instruments.contains_key(&key) {
                return Err(FixtureError::Invalid(format!(
                    "duplicate instrument {}:{}",
                    key.0, key.1
                )));
            }
            instruments.insert(key, instrument);
        }
        Ok(Self {
            instruments,
            portfolio: document.portfolio,
        })
    }

    /// Parses a backend from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when parsing or indexing fails.
    pub fn from_json_str(content: &str) -> Result<Self, FixtureError> {
        let document: FixtureDocument =
            serde_json::from_str(content).map_err(|err| FixtureError::Parse(err.to_string()))?;
        Self::from_document(document)
    }

    /// Loads a backend from a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let bytes = fs::read(path).map_err(|err| FixtureError::Io(err.to_string()))?;
        if bytes.len() > MAX_FIXTURE_FILE_SIZE {
            return Err(FixtureError::Invalid("fixture file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| FixtureError::Invalid("fixture file must be utf-8".to_string()))?;
        Self::from_json_str(content)
    }

    /// Returns the number of indexed instruments.
    #[must_use]
    pub fn instrument_count(&self) -> usize {
        self.instruments.len()
    }

    /// Returns the fixture entry backing `instrument`.
    fn entry(&self, instrument: &InstrumentSnapshot) -> Result<&FixtureInstrument, BackendError> {
        self.instruments
            .get(&(instrument.exchange_segment.clone(), instrument.symbol.clone()))
            .ok_or_else(|| not_found(&instrument.exchange_segment, &instrument.symbol))
    }

    /// Returns a canned market-data payload or a not-found error.
    fn payload(
        &self,
        instrument: &InstrumentSnapshot,
        kind: &str,
        select: fn(&FixtureInstrument) -> Option<&Value>,
    ) -> Result<Value, BackendError> {
        let entry = self.entry(instrument)?;
        select(entry).cloned().ok_or_else(|| {
            BackendError::NotFound(format!(
                "{kind} for {}:{}",
                instrument.exchange_segment, instrument.symbol
            ))
        })
    }
}

impl MarketBackend for FixtureBackend {
    fn find_instrument(
        &self,
        exchange_segment: &str,
        symbol: &str,
    ) -> Result<InstrumentSnapshot, BackendError> {
        self.instruments
            .get(&(exchange_segment.to_string(), symbol.to_string()))
            .map(|entry| entry.snapshot.clone())
            .ok_or_else(|| not_found(exchange_segment, symbol))
    }

    fn ltp(&self, instrument: &InstrumentSnapshot) -> Result<Value, BackendError> {
        self.payload(instrument, "ltp", |entry| entry.ltp.as_ref())
    }

    fn quote(&self, instrument: &InstrumentSnapshot) -> Result<Value, BackendError> {
        self.payload(instrument, "quote", |entry| entry.quote.as_ref())
    }

    fn ohlc(&self, instrument: &InstrumentSnapshot) -> Result<Value, BackendError> {
        self.payload(instrument, "ohlc", |entry| entry.ohlc.as_ref())
    }

    fn daily(
        &self,
        instrument: &InstrumentSnapshot,
        _from: &str,
        _to: &str,
    ) -> Result<Value, BackendError> {
        self.payload(instrument, "daily candles", |entry| entry.daily.as_ref())
    }

    fn intraday(
        &self,
        instrument: &InstrumentSnapshot,
        _from: &str,
        _to: &str,
        _interval: &str,
    ) -> Result<Value, BackendError> {
        self.payload(instrument, "intraday candles", |entry| entry.intraday.as_ref())
    }

    fn expiry_list(&self, instrument: &InstrumentSnapshot) -> Result<Vec<String>, BackendError> {
        Ok(self.entry(instrument)?.expiries.clone())
    }

    fn option_chain(
        &self,
        instrument: &InstrumentSnapshot,
        expiry: &str,
    ) -> Result<Vec<OptionContract>, BackendError> {
        self.entry(instrument)?
            .option_chains
            .get(expiry)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("option chain for expiry {expiry}")))
    }

    fn holdings(&self) -> Result<Value, BackendError> {
        Ok(self.portfolio.holdings.clone())
    }

    fn positions(&self) -> Result<Value, BackendError> {
        Ok(self.portfolio.positions.clone())
    }

    fn funds(&self) -> Result<Value, BackendError> {
        Ok(self.portfolio.funds.clone())
    }

    fn order_book(&self) -> Result<Value, BackendError> {
        Ok(self.portfolio.orders.clone())
    }

    fn trade_book(&self) -> Result<Value, BackendError> {
        Ok(self.portfolio.trades.clone())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the not-found error for an instrument key.
fn not_found(exchange_segment: &str, symbol: &str) -> BackendError {
    BackendError::NotFound(format!("instrument {exchange_segment}:{symbol}"))
}

/// Default empty list payload.
fn empty_list() -> Value {
    json!([])
}

/// Default empty object payload.
fn empty_object() -> Value {
    json!({})
}
