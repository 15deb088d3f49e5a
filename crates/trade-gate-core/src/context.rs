// crates/trade-gate-core/src/context.rs
// ============================================================================
// Module: Execution Context
// Description: Per-session dependencies and metadata for tool execution.
// Purpose: Carry the backend handle, test overrides, and subscription state.
// Dependencies: crate::{backend, stream}, time
// ============================================================================

//! ## Overview
//! An [`ExecutionContext`] is owned by one session. It carries no
//! authentication or environment state; the host supplies the backend and any
//! metadata overrides. The subscription registry lives here so it survives
//! across calls within the session without being process-global.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use time::OffsetDateTime;

use crate::backend::MarketBackend;
use crate::stream::SubscriptionRegistry;

// ============================================================================
// SECTION: Metadata
// ============================================================================

/// Mutable metadata overrides for a session.
///
/// # Invariants
/// - `None` fields fall back to live values (wall clock, caller arguments).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContextMeta {
    /// Fixed "current time" used by time-sensitive checks.
    pub now: Option<OffsetDateTime>,
    /// Pre-seeded underlying spot price for option selection.
    pub spot_price: Option<f64>,
}

// ============================================================================
// SECTION: Execution Context
// ============================================================================

/// Execution context for tool calls within one session.
pub struct ExecutionContext {
    /// Broker and market-data backend.
    backend: Arc<dyn MarketBackend>,
    /// Metadata overrides.
    meta: ContextMeta,
    /// Active market-data subscriptions.
    subscriptions: SubscriptionRegistry,
}

impl ExecutionContext {
    /// Creates a context with default metadata and an empty registry.
    #[must_use]
    pub fn new(backend: Arc<dyn MarketBackend>) -> Self {
        Self {
            backend,
            meta: ContextMeta::default(),
            subscriptions: SubscriptionRegistry::new(),
        }
    }

    /// Replaces the metadata overrides.
    #[must_use]
    pub const fn with_meta(mut self, meta: ContextMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Returns the backend handle.
    #[must_use]
    pub fn backend(&self) -> &dyn MarketBackend {
        self.backend.as_ref()
    }

    /// Returns the metadata overrides.
    #[must_use]
    pub const fn meta(&self) -> &ContextMeta {
        &self.meta
    }

    /// Returns mutable metadata overrides.
    pub const fn meta_mut(&mut self) -> &mut ContextMeta {
        &mut self.meta
    }

    /// Returns the subscription registry.
    #[must_use]
    pub const fn subscriptions(&self) -> &SubscriptionRegistry {
        &self.subscriptions
    }

    /// Returns the mutable subscription registry.
    pub const fn subscriptions_mut(&mut self) -> &mut SubscriptionRegistry {
        &mut self.subscriptions
    }

    /// Returns the injected time when present, else the wall clock in UTC.
    #[must_use]
    pub fn now(&self) -> OffsetDateTime {
        self.meta.now.unwrap_or_else(OffsetDateTime::now_utc)
    }
}
