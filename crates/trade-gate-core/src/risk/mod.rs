// crates/trade-gate-core/src/risk/mod.rs
// ============================================================================
// Module: Risk Pipeline
// Description: Ordered compliance checks gating every trade intent.
// Purpose: Evaluate baseline and kind-specific rules with fail-fast semantics.
// Dependencies: crate::{arguments, context, instrument}, thiserror, time
// ============================================================================

//! ## Overview
//! The risk pipeline runs an immutable, ordered list of [`RiskCheck`] values
//! against a (context, arguments, instrument) triple. The baseline set always
//! runs first; the set for the requested [`RiskKind`] runs after it. The first
//! failing check ends the run with a [`RiskViolation`]. A successful run mints
//! a [`RiskClearance`], the only way to build a [`crate::TradeIntent`].
//!
//! Security posture: arguments are untrusted caller input; every check treats
//! missing or mistyped values as the most restrictive case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;
use time::OffsetDateTime;
use time::Time;
use time::UtcOffset;
use time::macros::offset;
use time::macros::time;

use crate::arguments::Arguments;
use crate::context::ExecutionContext;
use crate::instrument::InstrumentSnapshot;

mod checks;

pub use checks::AsmGsmCheck;
pub use checks::EquityOrderCheck;
pub use checks::MarketHoursCheck;
pub use checks::OptionsCheck;
pub use checks::OrderTypeCheck;
pub use checks::ProductSupportCheck;
pub use checks::QuantityCheck;
pub use checks::TradingPermissionCheck;


// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum order quantity.
pub const DEFAULT_MAX_QUANTITY: i64 = 10;
/// Default maximum notional value (quantity x price).
pub const DEFAULT_MAX_NOTIONAL: f64 = 100_000.0;

/// Quantity and notional limits enforced by the baseline set.
///
/// # Invariants
/// - Both limits are positive when loaded through configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskLimits {
    /// Maximum order quantity (inclusive).
    pub max_quantity: i64,
    /// Maximum notional value (inclusive).
    pub max_notional: f64,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_quantity: DEFAULT_MAX_QUANTITY,
            max_notional: DEFAULT_MAX_NOTIONAL,
        }
    }
}

// ============================================================================
// SECTION: Market Hours
// ============================================================================

/// Exchange trading session window at a fixed UTC offset.
///
/// # Invariants
/// - Both boundaries are inclusive.
/// - `open` precedes `close` when loaded through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketHours {
    /// Exchange-local UTC offset.
    pub utc_offset: UtcOffset,
    /// Session open (exchange-local).
    pub open: Time,
    /// Session close (exchange-local).
    pub close: Time,
}

impl MarketHours {
    /// Returns true when `at` falls within the session window.
    #[must_use]
    pub fn is_open(&self, at: OffsetDateTime) -> bool {
        let local = at.to_offset(self.utc_offset).time();
        local >= self.open && local <= self.close
    }
}

impl Default for MarketHours {
    fn default() -> Self {
        Self {
            utc_offset: offset!(+5:30),
            open: time!(9:15),
            close: time!(15:30),
        }
    }
}

// ============================================================================
// SECTION: Kinds and Outcomes
// ============================================================================

/// Kind-specific check set selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskKind {
    /// Equity/futures orders (`orders.prepare`).
    Equity,
    /// Options buy orders (`option.prepare`).
    Options,
}

impl RiskKind {
    /// Returns the stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Options => "options",
        }
    }
}

impl fmt::Display for RiskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First failing compliance rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct RiskViolation {
    /// Name of the check that failed.
    check: &'static str,
    /// Human-readable reason.
    reason: String,
}

impl RiskViolation {
    /// Creates a violation raised by `check`.
    #[must_use]
    pub fn new(check: &'static str, reason: impl Into<String>) -> Self {
        Self {
            check,
            reason: reason.into(),
        }
    }

    /// Returns the failing check name.
    #[must_use]
    pub const fn check(&self) -> &'static str {
        self.check
    }

    /// Returns the human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Proof that a pipeline run cleared a set of arguments.
///
/// # Invariants
/// - Only minted by [`RiskPipeline::run`]; not cloneable.
#[derive(Debug, PartialEq, Eq)]
pub struct RiskClearance {
    /// Kind the run cleared.
    kind: RiskKind,
}

impl RiskClearance {
    /// Returns the kind the run cleared.
    #[must_use]
    pub const fn kind(&self) -> RiskKind {
        self.kind
    }
}

// ============================================================================
// SECTION: Check Trait
// ============================================================================

/// Inputs shared by every check in one run.
#[derive(Clone, Copy)]
pub struct RiskInput<'a> {
    /// Session execution context.
    pub context: &'a ExecutionContext,
    /// Validated tool arguments.
    pub args: &'a Arguments,
    /// Freshly loaded instrument snapshot.
    pub instrument: &'a InstrumentSnapshot,
}

/// A single stateless compliance rule.
pub trait RiskCheck: Send + Sync {
    /// Returns the stable check name.
    fn name(&self) -> &'static str;

    /// Evaluates the rule.
    ///
    /// # Errors
    ///
    /// Returns [`RiskViolation`] when the rule fails.
    fn check(&self, input: &RiskInput<'_>) -> Result<(), RiskViolation>;
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Ordered compliance pipeline.
///
/// # Invariants
/// - Check sets are fixed at construction.
/// - Baseline always runs before the kind-specific set.
pub struct RiskPipeline {
    /// Checks applied to every mutating tool.
    baseline: Vec<Box<dyn RiskCheck>>,
    /// Checks applied to options intents.
    options: Vec<Box<dyn RiskCheck>>,
    /// Checks applied to equity/futures intents.
    equity: Vec<Box<dyn RiskCheck>>,
}

impl RiskPipeline {
    /// Builds the standard pipeline with the provided limits and session window.
    #[must_use]
    pub fn new(limits: RiskLimits, hours: MarketHours) -> Self {
        Self {
            baseline: vec![
                Box::new(TradingPermissionCheck),
                Box::new(AsmGsmCheck),
                Box::new(ProductSupportCheck),
                Box::new(OrderTypeCheck),
                Box::new(QuantityCheck::new(limits)),
                Box::new(MarketHoursCheck::new(hours)),
            ],
            options: vec![Box::new(OptionsCheck)],
            equity: vec![Box::new(EquityOrderCheck)],
        }
    }

    /// Runs the baseline set, then the set for `kind`, stopping at the first
    /// violation.
    ///
    /// # Errors
    ///
    /// Returns the first [`RiskViolation`] raised.
    pub fn run(
        &self,
        context: &ExecutionContext,
        args: &Arguments,
        instrument: &InstrumentSnapshot,
        kind: RiskKind,
    ) -> Result<RiskClearance, RiskViolation> {
        let input = RiskInput {
            context,
            args,
            instrument,
        };
        for check in self.baseline.iter().chain(self.kind_checks(kind)) {
            check.check(&input)?;
        }
        Ok(RiskClearance {
            kind,
        })
    }

    /// Returns the ordered check names applied for `kind`.
    #[must_use]
    pub fn check_names(&self, kind: RiskKind) -> Vec<&'static str> {
        self.baseline.iter().chain(self.kind_checks(kind)).map(|check| check.name()).collect()
    }

    /// Returns the kind-specific check set.
    fn kind_checks(&self, kind: RiskKind) -> &[Box<dyn RiskCheck>] {
        match kind {
            RiskKind::Equity => &self.equity,
            RiskKind::Options => &self.options,
        }
    }
}

impl Default for RiskPipeline {
    fn default() -> Self {
        Self::new(RiskLimits::default(), MarketHours::default())
    }
}
