// crates/trade-gate-core/src/risk/checks.rs
// ============================================================================
// Module: Risk Checks
// Description: Individual compliance rules used by the risk pipeline.
// Purpose: Keep each rule a small stateless value behind `RiskCheck`.
// Dependencies: crate::{arguments, risk}
// ============================================================================

//! ## Overview
//! Each check reads the instrument snapshot and the validated arguments and
//! either passes or returns one [`RiskViolation`]. Checks that depend on
//! configuration hold it as a field set at pipeline construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use super::MarketHours;
use super::RiskCheck;
use super::RiskInput;
use super::RiskLimits;
use super::RiskViolation;
use crate::arguments::f64_arg;
use crate::arguments::has_arg;
use crate::arguments::i64_arg;
use crate::arguments::str_arg;
use crate::arguments::u64_arg;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Order types accepted by the baseline set.
const VALID_ORDER_TYPES: [&str; 2] = ["MARKET", "LIMIT"];
/// Bracket order product label.
const BRACKET_PRODUCT: &str = "BO";
/// Cover order product label.
const COVER_PRODUCT: &str = "CO";
/// Buy-side transaction label.
const BUY: &str = "BUY";

// ============================================================================
// SECTION: Baseline Checks
// ============================================================================

/// Rejects instruments disabled for trading.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradingPermissionCheck;

impl RiskCheck for TradingPermissionCheck {
    fn name(&self) -> &'static str {
        "trading_permission"
    }

    fn check(&self, input: &RiskInput<'_>) -> Result<(), RiskViolation> {
        if input.instrument.trading_allowed {
            return Ok(());
        }
        Err(RiskViolation::new(self.name(), "Trading disabled for instrument"))
    }
}

/// Rejects instruments under ASM/GSM surveillance.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsmGsmCheck;

impl RiskCheck for AsmGsmCheck {
    fn name(&self) -> &'static str {
        "asm_gsm"
    }

    fn check(&self, input: &RiskInput<'_>) -> Result<(), RiskViolation> {
        if !input.instrument.asm_gsm_restricted {
            return Ok(());
        }
        Err(RiskViolation::new(
            self.name(),
            format!("ASM/GSM restricted instrument ({})", input.instrument.asm_gsm_status()),
        ))
    }
}

/// Rejects bracket and cover products the instrument does not support.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductSupportCheck;

impl RiskCheck for ProductSupportCheck {
    fn name(&self) -> &'static str {
        "product_support"
    }

    fn check(&self, input: &RiskInput<'_>) -> Result<(), RiskViolation> {
        match str_arg(input.args, "product_type") {
            Some(BRACKET_PRODUCT) if !input.instrument.bracket_supported => {
                Err(RiskViolation::new(self.name(), "Bracket orders not supported"))
            }
            Some(COVER_PRODUCT) if !input.instrument.cover_supported => {
                Err(RiskViolation::new(self.name(), "Cover orders not supported"))
            }
            _ => Ok(()),
        }
    }
}

/// Restricts supplied order types to MARKET and LIMIT.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderTypeCheck;

impl RiskCheck for OrderTypeCheck {
    fn name(&self) -> &'static str {
        "order_type"
    }

    fn check(&self, input: &RiskInput<'_>) -> Result<(), RiskViolation> {
        if !has_arg(input.args, "order_type") {
            return Ok(());
        }
        match str_arg(input.args, "order_type") {
            Some(order_type) if VALID_ORDER_TYPES.contains(&order_type) => Ok(()),
            _ => Err(RiskViolation::new(self.name(), "Invalid order type")),
        }
    }
}

/// Enforces positive quantity and the quantity/notional limits.
#[derive(Debug, Clone, Copy)]
pub struct QuantityCheck {
    /// Configured limits.
    limits: RiskLimits,
}

impl QuantityCheck {
    /// Creates the check with the given limits.
    #[must_use]
    pub const fn new(limits: RiskLimits) -> Self {
        Self {
            limits,
        }
    }
}

impl RiskCheck for QuantityCheck {
    fn name(&self) -> &'static str {
        "quantity"
    }

    fn check(&self, input: &RiskInput<'_>) -> Result<(), RiskViolation> {
        let quantity = match i64_arg(input.args, "quantity") {
            Some(quantity) => quantity,
            None if u64_arg(input.args, "quantity").is_some() => {
                return Err(RiskViolation::new(self.name(), "Quantity exceeds limit"));
            }
            None => 0,
        };
        if quantity <= 0 {
            return Err(RiskViolation::new(self.name(), "Quantity must be > 0"));
        }
        if quantity > self.limits.max_quantity {
            return Err(RiskViolation::new(self.name(), "Quantity exceeds limit"));
        }
        if let Some(price) = f64_arg(input.args, "price") {
            #[allow(clippy::cast_precision_loss, reason = "Quantity is bounded by max_quantity.")]
            let notional = quantity as f64 * price;
            if notional > self.limits.max_notional {
                return Err(RiskViolation::new(self.name(), "Notional exceeds limit"));
            }
        }
        Ok(())
    }
}

/// Rejects requests outside the exchange session window.
#[derive(Debug, Clone, Copy)]
pub struct MarketHoursCheck {
    /// Configured session window.
    hours: MarketHours,
}

impl MarketHoursCheck {
    /// Creates the check with the given session window.
    #[must_use]
    pub const fn new(hours: MarketHours) -> Self {
        Self {
            hours,
        }
    }
}

impl RiskCheck for MarketHoursCheck {
    fn name(&self) -> &'static str {
        "market_hours"
    }

    fn check(&self, input: &RiskInput<'_>) -> Result<(), RiskViolation> {
        if self.hours.is_open(input.context.now()) {
            return Ok(());
        }
        Err(RiskViolation::new(self.name(), "Market is closed"))
    }
}

// ============================================================================
// SECTION: Kind Checks
// ============================================================================

/// Options buy rules: index underlying, mandatory exits, positive reward.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionsCheck;

impl RiskCheck for OptionsCheck {
    fn name(&self) -> &'static str {
        "options"
    }

    fn check(&self, input: &RiskInput<'_>) -> Result<(), RiskViolation> {
        if !input.instrument.is_index() {
            return Err(RiskViolation::new(self.name(), "Options only allowed on index"));
        }
        if !has_arg(input.args, "stop_loss") {
            return Err(RiskViolation::new(self.name(), "Stop loss required"));
        }
        if !has_arg(input.args, "target") {
            return Err(RiskViolation::new(self.name(), "Target required"));
        }
        match (f64_arg(input.args, "target"), f64_arg(input.args, "stop_loss")) {
            (Some(target), Some(stop_loss)) if target > stop_loss => Ok(()),
            _ => Err(RiskViolation::new(self.name(), "Invalid risk-reward")),
        }
    }
}

/// Equity/futures rules: non-index instrument and side-aware exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquityOrderCheck;

impl RiskCheck for EquityOrderCheck {
    fn name(&self) -> &'static str {
        "equity_order"
    }

    fn check(&self, input: &RiskInput<'_>) -> Result<(), RiskViolation> {
        if input.instrument.is_index() {
            return Err(RiskViolation::new(self.name(), "Use option.prepare for index options"));
        }
        let stop_loss = positive_price(input, "stop_loss", "Invalid stop loss")?;
        let target = positive_price(input, "target", "Invalid target")?;
        let (Some(stop_loss), Some(target)) = (stop_loss, target) else {
            return Ok(());
        };
        let favourable = if str_arg(input.args, "transaction_type") == Some(BUY) {
            target > stop_loss
        } else {
            stop_loss > target
        };
        if favourable {
            Ok(())
        } else {
            Err(RiskViolation::new(self.name(), "Bad risk-reward ratio"))
        }
    }
}

/// Reads an optional price that must be positive when supplied.
fn positive_price(
    input: &RiskInput<'_>,
    key: &str,
    reason: &'static str,
) -> Result<Option<f64>, RiskViolation> {
    if !has_arg(input.args, key) {
        return Ok(None);
    }
    match f64_arg(input.args, key) {
        Some(value) if value > 0.0 => Ok(Some(value)),
        _ => Err(RiskViolation::new("equity_order", reason)),
    }
}
