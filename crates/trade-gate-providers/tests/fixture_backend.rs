// crates/trade-gate-providers/tests/fixture_backend.rs
// ============================================================================
// Module: Fixture Backend Tests
// Description: Lookup, pass-through, and load-guard tests for FixtureBackend.
// Purpose: Ensure the fixture backend answers like a broker and fails closed.
// Dependencies: trade-gate-core, trade-gate-providers, tempfile
// ============================================================================

//! ## Overview
//! Loads a small fixture document and exercises every `MarketBackend` call.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;
use trade_gate_core::BackendError;
use trade_gate_core::MarketBackend;
use trade_gate_core::OptionType;
use trade_gate_providers::FixtureBackend;
use trade_gate_providers::FixtureError;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Returns a fixture document with one index and one equity.
fn document() -> serde_json::Value {
    json!({
        "instruments": [
            {
                "security_id": "13",
                "symbol": "NIFTY",
                "exchange_segment": "IDX_I",
                "instrument_type": "INDEX",
                "expiry_flag": "N",
                "trading_allowed": true,
                "ltp": {"last_price": 21005.5},
                "expiries": ["2024-01-25", "2024-02-01"],
                "option_chains": {
                    "2024-01-25": [
                        {"security_id": "OPT1", "strike": 21000, "option_type": "CE", "ltp": 120.0}
                    ]
                }
            },
            {
                "security_id": "11536",
                "symbol": "TCS",
                "exchange_segment": "NSE_EQ",
                "instrument_type": "EQUITY",
                "expiry_flag": "N",
                "isin": "INE467B01029",
                "trading_allowed": true,
                "quote": {"bid": 3500.0, "ask": 3500.5},
                "daily": [{"close": 3490.0}]
            }
        ],
        "portfolio": {
            "holdings": [{"symbol": "TCS", "quantity": 3}],
            "funds": {"available": 50000.0}
        }
    })
}

/// Builds a backend from [`document`].
fn backend() -> FixtureBackend {
    FixtureBackend::from_json_str(&document().to_string()).unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn finds_instruments_by_segment_and_symbol() {
    let backend = backend();
    assert_eq!(backend.instrument_count(), 2);
    let tcs = backend.find_instrument("NSE_EQ", "TCS").unwrap();
    assert_eq!(tcs.security_id, "11536");
    assert_eq!(tcs.isin.as_deref(), Some("INE467B01029"));
    assert_eq!(
        backend.find_instrument("BSE_EQ", "TCS").unwrap_err(),
        BackendError::NotFound("instrument BSE_EQ:TCS".to_string())
    );
}

#[test]
fn market_data_passes_through() {
    let backend = backend();
    let nifty = backend.find_instrument("IDX_I", "NIFTY").unwrap();
    let tcs = backend.find_instrument("NSE_EQ", "TCS").unwrap();
    assert_eq!(backend.ltp(&nifty).unwrap(), json!({"last_price": 21005.5}));
    assert_eq!(backend.quote(&tcs).unwrap()["ask"], json!(3500.5));
    assert_eq!(backend.daily(&tcs, "2024-01-01", "2024-01-31").unwrap(), json!([{"close": 3490.0}]));
    assert!(matches!(backend.ohlc(&tcs), Err(BackendError::NotFound(_))));
}

#[test]
fn option_data_is_keyed_by_expiry() {
    let backend = backend();
    let nifty = backend.find_instrument("IDX_I", "NIFTY").unwrap();
    assert_eq!(backend.expiry_list(&nifty).unwrap(), vec!["2024-01-25", "2024-02-01"]);
    let chain = backend.option_chain(&nifty, "2024-01-25").unwrap();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].option_type, OptionType::Call);
    assert!(backend.option_chain(&nifty, "2024-02-01").is_err());
}

#[test]
fn portfolio_defaults_to_empty_books() {
    let backend = backend();
    assert_eq!(backend.holdings().unwrap(), json!([{"symbol": "TCS", "quantity": 3}]));
    assert_eq!(backend.funds().unwrap(), json!({"available": 50000.0}));
    assert_eq!(backend.positions().unwrap(), json!([]));
    assert_eq!(backend.order_book().unwrap(), json!([]));
    assert_eq!(backend.trade_book().unwrap(), json!([]));
}

#[test]
fn duplicate_instruments_are_rejected() {
    let mut doc = document();
    let first = doc["instruments"][0].clone();
    doc["instruments"].as_array_mut().unwrap().push(first);
    let err = FixtureBackend::from_json_str(&doc.to_string()).unwrap_err();
    assert_eq!(err, FixtureError::Invalid("duplicate instrument IDX_I:NIFTY".to_string()));
}

#[test]
fn load_reads_files_and_rejects_garbage() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(document().to_string().as_bytes()).unwrap();
    assert_eq!(FixtureBackend::load(file.path()).unwrap().instrument_count(), 2);

    let mut garbage = NamedTempFile::new().unwrap();
    garbage.write_all(b"{not json").unwrap();
    assert!(matches!(FixtureBackend::load(garbage.path()), Err(FixtureError::Parse(_))));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(FixtureBackend::load(&dir.path().join("absent.json")), Err(FixtureError::Io(_))));
}
