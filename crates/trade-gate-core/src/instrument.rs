// crates/trade-gate-core/src/instrument.rs
// ============================================================================
// Module: Instrument Model
// Description: Read-only instrument snapshots and option chain rows.
// Purpose: Carry the compliance-relevant attributes supplied by the broker backend.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`InstrumentSnapshot`] is loaded from the backend for every tool call and
//! is never cached by the core. It carries identity fields (passed through to
//! callers verbatim) and the flags the risk pipeline consumes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Instrument type label for index instruments.
pub const INDEX_INSTRUMENT_TYPE: &str = "INDEX";

// ============================================================================
// SECTION: Instrument Snapshot
// ============================================================================

/// Snapshot of a tradable instrument as reported by the backend.
///
/// # Invariants
/// - Identity fields are opaque backend values and are never normalized.
/// - Snapshots are read-only views; the core does not mutate or cache them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSnapshot {
    /// Backend security identifier.
    pub security_id: String,
    /// Trading symbol.
    pub symbol: String,
    /// Human-readable instrument name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Underlying symbol for derivatives.
    #[serde(default)]
    pub underlying_symbol: Option<String>,
    /// Exchange segment code (for example `NSE_EQ` or `IDX_I`).
    pub exchange_segment: String,
    /// Segment letter reported by the exchange master.
    #[serde(default)]
    pub segment: Option<String>,
    /// Instrument class reported by the exchange master.
    #[serde(default)]
    pub instrument: Option<String>,
    /// Instrument type (for example `INDEX` or `EQUITY`).
    pub instrument_type: String,
    /// Expiry flag reported by the exchange master.
    pub expiry_flag: String,
    /// ISIN when the instrument has one.
    #[serde(default)]
    pub isin: Option<String>,
    /// Whether the instrument is enabled for trading.
    pub trading_allowed: bool,
    /// Whether an ASM/GSM surveillance restriction is active.
    #[serde(default)]
    pub asm_gsm_restricted: bool,
    /// Surveillance category when restricted.
    #[serde(default)]
    pub asm_gsm_category: Option<String>,
    /// Whether bracket orders are supported.
    #[serde(default)]
    pub bracket_supported: bool,
    /// Whether cover orders are supported.
    #[serde(default)]
    pub cover_supported: bool,
    /// Margin trading facility leverage.
    #[serde(default)]
    pub mtf_leverage: Option<f64>,
    /// Minimum buy-side margin percentage for cover orders.
    #[serde(default)]
    pub buy_margin_pct: Option<f64>,
    /// Minimum sell-side margin percentage for cover orders.
    #[serde(default)]
    pub sell_margin_pct: Option<f64>,
}

impl InstrumentSnapshot {
    /// Returns true when the instrument is an index.
    #[must_use]
    pub fn is_index(&self) -> bool {
        self.instrument_type == INDEX_INSTRUMENT_TYPE
    }

    /// Returns the surveillance status label (`NONE` or the active category).
    #[must_use]
    pub fn asm_gsm_status(&self) -> &str {
        if !self.asm_gsm_restricted {
            return "NONE";
        }
        self.asm_gsm_category.as_deref().unwrap_or("UNKNOWN")
    }
}

// ============================================================================
// SECTION: Option Chain
// ============================================================================

/// Option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option.
    #[serde(rename = "CE")]
    Call,
    /// Put option.
    #[serde(rename = "PE")]
    Put,
}

impl OptionType {
    /// Returns the exchange label for the option side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "CE",
            Self::Put => "PE",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One strike/side row of an option chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Backend security identifier of the option contract.
    pub security_id: String,
    /// Strike price.
    pub strike: f64,
    /// Option side.
    pub option_type: OptionType,
    /// Last traded premium.
    pub ltp: f64,
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

    use serde_json::json;

    use super::InstrumentSnapshot;
    use super::OptionContract;
    use super::OptionType;

    #[test]
    fn snapshot_deserializes_with_optional_fields_absent() {
        let snapshot: InstrumentSnapshot = serde_json::from_value(json!({
            "security_id": "13",
            "symbol": "NIFTY",
            "exchange_segment": "IDX_I",
            "instrument_type": "INDEX",
            "expiry_flag": "N",
            "trading_allowed": true
        }))
        .unwrap();
        assert!(snapshot.is_index());
        assert!(!snapshot.asm_gsm_restricted);
        assert_eq!(snapshot.asm_gsm_status(), "NONE");
        assert_eq!(snapshot.isin, None);
    }

    #[test]
    fn restricted_snapshot_reports_category() {
        let snapshot: InstrumentSnapshot = serde_json::from_value(json!({
            "security_id": "500",
            "symbol": "XYZ",
            "exchange_segment": "NSE_EQ",
            "instrument_type": "EQUITY",
            "expiry_flag": "N",
            "trading_allowed": true,
            "asm_gsm_restricted": true,
            "asm_gsm_category": "STAGE1"
        }))
        .unwrap();
        assert_eq!(snapshot.asm_gsm_status(), "STAGE1");
    }

    #[test]
    fn option_type_uses_exchange_labels() {
        let row = OptionContract {
            security_id: "SEC1".to_string(),
            strike: 21_000.0,
            option_type: OptionType::Put,
            ltp: 95.5,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["option_type"], "PE");
        assert_eq!(OptionType::Call.to_string(), "CE");
    }
}
