// crates/trade-gate-core/src/intent.rs
// ============================================================================
// Module: Trade Intents
// Description: Proposed trades produced by the mutating tools.
// Purpose: Make intent construction depend on a successful risk pipeline run.
// Dependencies: crate::risk, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`TradeIntent`] is a proposal returned to the caller for human
//! confirmation. It is never submitted. Construction consumes a
//! [`RiskClearance`], which only [`crate::RiskPipeline::run`] can mint, so an
//! intent cannot exist for arguments the pipeline has not cleared.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::risk::RiskClearance;
use crate::risk::RiskKind;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Confirmation note attached to equity/futures intents.
const EQUITY_NOTE: &str = "Prepared trade intent. Await human confirmation.";
/// Confirmation note attached to options intents.
const OPTIONS_NOTE: &str = "Prepared options BUY trade. Await human confirmation.";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Trade intent category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TradeType {
    /// Equity or futures order.
    #[serde(rename = "EQUITY_FUTURES")]
    EquityFutures,
    /// Options buy order.
    #[serde(rename = "OPTIONS_BUY")]
    OptionsBuy,
}

/// Cleared equity/futures order parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityOrder {
    /// Instrument symbol.
    pub symbol: String,
    /// Exchange segment code.
    pub exchange_segment: String,
    /// `BUY` or `SELL`.
    pub transaction_type: String,
    /// Order quantity.
    pub quantity: i64,
    /// Order type label.
    pub order_type: String,
    /// Product type label.
    pub product_type: String,
    /// Limit price.
    pub price: Option<f64>,
    /// Stop-loss price.
    pub stop_loss: Option<f64>,
    /// Target price.
    pub target: Option<f64>,
}

/// Cleared options buy parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionOrder {
    /// Underlying symbol.
    pub symbol: String,
    /// Option contract security identifier.
    pub security_id: String,
    /// Strike price.
    pub strike: f64,
    /// Option side label (`CE` or `PE`).
    pub option_type: String,
    /// Expiry date.
    pub expiry: String,
    /// Order quantity.
    pub quantity: i64,
    /// Stop-loss premium.
    pub stop_loss: Option<f64>,
    /// Target premium.
    pub target: Option<f64>,
}

/// Intent construction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntentError {
    /// The clearance was issued for a different pipeline kind.
    #[error("risk clearance for {actual} cannot build a {expected} intent")]
    ClearanceMismatch {
        /// Kind the intent requires.
        expected: RiskKind,
        /// Kind the clearance carries.
        actual: RiskKind,
    },
}

// ============================================================================
// SECTION: Trade Intent
// ============================================================================

/// Proposed trade awaiting human confirmation.
///
/// # Invariants
/// - Only constructible from a [`RiskClearance`] of the matching kind.
/// - Absent optional fields are omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeIntent {
    /// Intent category.
    trade_type: TradeType,
    /// Human-readable instrument label.
    instrument: String,
    /// Contract security identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    security_id: Option<String>,
    /// Contract expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry: Option<String>,
    /// `BUY` or `SELL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_type: Option<String>,
    /// Order quantity.
    quantity: i64,
    /// Order type label.
    #[serde(skip_serializing_if = "Option::is_none")]
    order_type: Option<String>,
    /// Product type label.
    #[serde(skip_serializing_if = "Option::is_none")]
    product_type: Option<String>,
    /// Limit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    /// Stop-loss price.
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_loss: Option<f64>,
    /// Target price.
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<f64>,
    /// Confirmation note.
    note: &'static str,
}

impl TradeIntent {
    /// Builds an equity/futures intent from a cleared order.
    ///
    /// # Errors
    ///
    /// Returns [`IntentError::ClearanceMismatch`] when the clearance is not
    /// for [`RiskKind::Equity`].
    pub fn equity(clearance: RiskClearance, order: EquityOrder) -> Result<Self, IntentError> {
        ensure_kind(&clearance, RiskKind::Equity)?;
        Ok(Self {
            trade_type: TradeType::EquityFutures,
            instrument: format!("{} ({})", order.symbol, order.exchange_segment),
            security_id: None,
            expiry: None,
            transaction_type: Some(order.transaction_type),
            quantity: order.quantity,
            order_type: Some(order.order_type),
            product_type: Some(order.product_type),
            price: order.price,
            stop_loss: order.stop_loss,
            target: order.target,
            note: EQUITY_NOTE,
        })
    }

    /// Builds an options buy intent from a cleared order.
    ///
    /// # Errors
    ///
    /// Returns [`IntentError::ClearanceMismatch`] when the clearance is not
    /// for [`RiskKind::Options`].
    pub fn options(clearance: RiskClearance, order: OptionOrder) -> Result<Self, IntentError> {
        ensure_kind(&clearance, RiskKind::Options)?;
        Ok(Self {
            trade_type: TradeType::OptionsBuy,
            instrument: format!("{} {} {}", order.symbol, order.strike, order.option_type),
            security_id: Some(order.security_id),
            expiry: Some(order.expiry),
            transaction_type: None,
            quantity: order.quantity,
            order_type: None,
            product_type: None,
            price: None,
            stop_loss: order.stop_loss,
            target: order.target,
            note: OPTIONS_NOTE,
        })
    }

    /// Returns the intent category.
    #[must_use]
    pub const fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    /// Returns the instrument label.
    #[must_use]
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    /// Returns the order quantity.
    #[must_use]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Returns the confirmation note.
    #[must_use]
    pub const fn note(&self) -> &'static str {
        self.note
    }
}

/// Rejects clearances issued for a different pipeline kind.
fn ensure_kind(clearance: &RiskClearance, expected: RiskKind) -> Result<(), IntentError> {
    let actual = clearance.kind();
    if actual == expected {
        Ok(())
    } else {
        Err(IntentError::ClearanceMismatch {
            expected,
            actual,
        })
    }
}
