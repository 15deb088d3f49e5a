// crates/trade-gate-providers/src/lib.rs
// ============================================================================
// Module: Trade Gate Providers
// Description: Built-in market backends.
// Purpose: Provide a deterministic backend for tests, demos, and offline use.
// Dependencies: trade-gate-core, serde, serde_json
// ============================================================================

//! ## Overview
//! This crate ships [`FixtureBackend`], a [`trade_gate_core::MarketBackend`]
//! served from an in-memory JSON document. Live broker adapters implement the
//! same trait outside this workspace.
//! Invariants:
//! - Lookups never mutate the loaded document.
//! - Fixture files are size-limited and fail closed on malformed input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod fixture;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use fixture::FixtureBackend;
pub use fixture::FixtureDocument;
pub use fixture::FixtureError;
pub use fixture::FixtureInstrument;
pub use fixture::FixturePortfolio;
