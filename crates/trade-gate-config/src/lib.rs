// crates/trade-gate-config/src/lib.rs
// ============================================================================
// Module: Trade Gate Config Library
// Description: Configuration model, loading, and validation.
// Purpose: Provide strict, fail-closed TOML configuration for Trade Gate.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Configuration is read from `trade-gate.toml` (or an explicit path), parsed
//! with `toml`, and validated before any server component is built.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::AuditConfig;
pub use config::BackendConfig;
pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::DEFAULT_CONFIG_NAME;
pub use config::MarketHoursConfig;
pub use config::RiskConfig;
pub use config::ServerConfig;
pub use config::ServerTransport;
pub use config::TradeGateConfig;
