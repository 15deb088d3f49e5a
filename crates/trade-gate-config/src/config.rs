// crates/trade-gate-config/src/config.rs
// ============================================================================
// Module: Trade Gate Configuration
// Description: Configuration loading and validation for Trade Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: trade-gate-core, serde, time, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `TRADE_GATE_CONFIG`, then the default
//! file name. Only a missing default file falls back to built-in defaults; an
//! explicit path that cannot be read is an error. Invalid configuration fails
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::Time;
use time::UtcOffset;
use time::macros::format_description;
use trade_gate_core::MarketHours;
use trade_gate_core::RiskLimits;
use trade_gate_core::risk::DEFAULT_MAX_NOTIONAL;
use trade_gate_core::risk::DEFAULT_MAX_QUANTITY;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "trade-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "TRADE_GATE_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default maximum request line size in bytes.
const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;
/// Default server name reported by `initialize`.
const DEFAULT_SERVER_NAME: &str = "trade-gate";

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Top-level Trade Gate configuration.
///
/// # Invariants
/// - A value returned by [`TradeGateConfig::load`] has passed [`TradeGateConfig::validate`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TradeGateConfig {
    /// Server transport settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Risk limits.
    #[serde(default)]
    pub risk: RiskConfig,
    /// Exchange session window.
    #[serde(default)]
    pub market_hours: MarketHoursConfig,
    /// Market backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
}

impl TradeGateConfig {
    /// Loads configuration from `path`, the environment, or the default file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = env::var(CONFIG_ENV_VAR).ok();
        let source = resolve_path(path, env_path)?;
        validate_path(source.path())?;
        let bytes = match fs::read(source.path()) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound && source.is_default() => {
                return Ok(Self::default());
            }
            Err(err) => return Err(ConfigError::Io(err.to_string())),
        };
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.risk.validate()?;
        self.market_hours.validate()?;
        self.backend.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Supported transport types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerTransport {
    /// Line-delimited JSON-RPC over stdin/stdout.
    #[default]
    Stdio,
    /// JSON-RPC over HTTP `POST /rpc`.
    Http,
}

impl ServerTransport {
    /// Returns the stable label for the transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Transport type.
    #[serde(default)]
    pub transport: ServerTransport,
    /// Bind address for the HTTP transport.
    #[serde(default)]
    pub bind: Option<String>,
    /// Maximum request line (or body) size in bytes.
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
    /// Server name reported during `initialize`.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: ServerTransport::Stdio,
            bind: None,
            max_line_bytes: default_max_line_bytes(),
            name: default_server_name(),
            audit: AuditConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Returns the parsed HTTP bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the address is absent or malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let bind = self.bind.as_deref().unwrap_or_default().trim();
        if bind.is_empty() {
            return Err(ConfigError::Invalid("http transport requires bind address".to_string()));
        }
        bind.parse().map_err(|_| ConfigError::Invalid("invalid bind address".to_string()))
    }

    /// Validates server transport configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_line_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_line_bytes must be greater than zero".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("server name must be non-empty".to_string()));
        }
        self.audit.validate()?;
        if self.transport == ServerTransport::Http {
            let addr = self.bind_addr()?;
            if !addr.ip().is_loopback() {
                return Err(ConfigError::Invalid(
                    "non-loopback bind disallowed without an auth layer".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Audit logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Enable structured audit logging.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
    /// Optional audit log path (JSON lines); stderr when absent.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            path: None,
        }
    }
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Risk
// ============================================================================

/// Risk limit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RiskConfig {
    /// Maximum order quantity (inclusive).
    #[serde(default = "default_max_quantity")]
    pub max_quantity: i64,
    /// Maximum notional value (inclusive).
    #[serde(default = "default_max_notional")]
    pub max_notional: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_quantity: DEFAULT_MAX_QUANTITY,
            max_notional: DEFAULT_MAX_NOTIONAL,
        }
    }
}

impl RiskConfig {
    /// Returns the limits consumed by the risk pipeline.
    #[must_use]
    pub const fn limits(&self) -> RiskLimits {
        RiskLimits {
            max_quantity: self.max_quantity,
            max_notional: self.max_notional,
        }
    }

    /// Validates risk limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_quantity <= 0 {
            return Err(ConfigError::Invalid("risk.max_quantity must be positive".to_string()));
        }
        if !self.max_notional.is_finite() || self.max_notional <= 0.0 {
            return Err(ConfigError::Invalid(
                "risk.max_notional must be a positive finite number".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Market Hours
// ============================================================================

/// Exchange session window configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MarketHoursConfig {
    /// Exchange UTC offset (`+HH:MM`).
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    /// Session open (`HH:MM`, exchange-local).
    #[serde(default = "default_open")]
    pub open: String,
    /// Session close (`HH:MM`, exchange-local).
    #[serde(default = "default_close")]
    pub close: String,
}

impl Default for MarketHoursConfig {
    fn default() -> Self {
        Self {
            utc_offset: default_utc_offset(),
            open: default_open(),
            close: default_close(),
        }
    }
}

impl MarketHoursConfig {
    /// Parses the configured window.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a field does not parse or the
    /// window is empty.
    pub fn market_hours(&self) -> Result<MarketHours, ConfigError> {
        let utc_offset = UtcOffset::parse(
            self.utc_offset.trim(),
            format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
        )
        .map_err(|_| ConfigError::Invalid("market_hours.utc_offset must be +HH:MM".to_string()))?;
        let open = parse_clock("market_hours.open", &self.open)?;
        let close = parse_clock("market_hours.close", &self.close)?;
        if open >= close {
            return Err(ConfigError::Invalid(
                "market_hours.open must precede market_hours.close".to_string(),
            ));
        }
        Ok(MarketHours {
            utc_offset,
            open,
            close,
        })
    }

    /// Validates the session window.
    fn validate(&self) -> Result<(), ConfigError> {
        self.market_hours().map(|_| ())
    }
}

// ============================================================================
// SECTION: Backend
// ============================================================================

/// Market backend configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Path to a JSON fixtures document.
    #[serde(default)]
    pub fixtures: Option<String>,
}

impl BackendConfig {
    /// Validates backend configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.fixtures {
            validate_path_string("backend.fixtures", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolved config path and how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// Caller-supplied or environment path; must exist.
    Explicit(PathBuf),
    /// Default file name; optional.
    Default(PathBuf),
}

impl ConfigSource {
    /// Returns the resolved path.
    fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Default(path) => path,
        }
    }

    /// Returns true when the path is the optional default.
    const fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>, env_path: Option<String>) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = path {
        return Ok(ConfigSource::Explicit(path.to_path_buf()));
    }
    if let Some(env_path) = env_path {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(ConfigSource::Explicit(PathBuf::from(env_path)));
    }
    Ok(ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_NAME)))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    validate_path(Path::new(trimmed))
        .map_err(|_| ConfigError::Invalid(format!("{field} exceeds path limits")))
}

/// Parses an `HH:MM` clock value.
fn parse_clock(field: &str, value: &str) -> Result<Time, ConfigError> {
    Time::parse(value.trim(), format_description!("[hour]:[minute]"))
        .map_err(|_| ConfigError::Invalid(format!("{field} must be HH:MM")))
}

/// Default max request line size.
const fn default_max_line_bytes() -> usize {
    DEFAULT_MAX_LINE_BYTES
}

/// Default server name.
fn default_server_name() -> String {
    DEFAULT_SERVER_NAME.to_string()
}

/// Default audit enablement.
const fn default_audit_enabled() -> bool {
    true
}

/// Default maximum quantity.
const fn default_max_quantity() -> i64 {
    DEFAULT_MAX_QUANTITY
}

/// Default maximum notional.
const fn default_max_notional() -> f64 {
    DEFAULT_MAX_NOTIONAL
}

/// Default exchange UTC offset.
fn default_utc_offset() -> String {
    "+05:30".to_string()
}

/// Default session open.
fn default_open() -> String {
    "09:15".to_string()
}

/// Default session close.
fn default_close() -> String {
    "15:30".to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
