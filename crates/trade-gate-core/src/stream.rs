// crates/trade-gate-core/src/stream.rs
// ============================================================================
// Module: Subscription Registry
// Description: Session-scoped market-data subscription bookkeeping.
// Purpose: Track live-feed subscriptions requested through the stream tools.
// Dependencies: serde, time, uuid
// ============================================================================

//! ## Overview
//! The registry records which instruments a session asked to stream. It does
//! not open any feed itself; the records describe intent for the host. Each
//! record receives a random RFC 4122 version 4 identifier. Records are kept in
//! insertion order and are owned by one session's execution context.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Opaque subscription identifier (UUID v4 text form).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(String);

impl SubscriptionId {
    /// Generates a fresh random version 4 identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an identifier supplied by a caller.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Live-feed granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeedType {
    /// Last traded price only.
    Ltp,
    /// Quote packets.
    Quote,
    /// Full market depth.
    Full,
}

impl FeedType {
    /// Parses a wire label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "LTP" => Some(Self::Ltp),
            "QUOTE" => Some(Self::Quote),
            "FULL" => Some(Self::Full),
            _ => None,
        }
    }

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltp => "LTP",
            Self::Quote => "QUOTE",
            Self::Full => "FULL",
        }
    }
}

/// Instrument identity recorded with a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInstrument {
    /// Exchange segment code.
    pub exchange_segment: String,
    /// Backend security identifier.
    pub security_id: String,
    /// Trading symbol.
    pub symbol: String,
}

/// One active subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// Subscription identifier.
    pub id: SubscriptionId,
    /// Subscribed instrument.
    pub instrument: StreamInstrument,
    /// Requested feed granularity.
    pub feed_type: FeedType,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// In-memory subscription registry.
///
/// # Invariants
/// - Identifiers are unique within the registry.
/// - Records are returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionRegistry {
    /// Active records in insertion order.
    records: Vec<SubscriptionRecord>,
}

impl SubscriptionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Adds a subscription stamped with the current wall-clock time.
    pub fn add(&mut self, instrument: StreamInstrument, feed_type: FeedType) -> SubscriptionId {
        self.add_at(instrument, feed_type, OffsetDateTime::now_utc())
    }

    /// Adds a subscription stamped with `created_at`.
    pub fn add_at(
        &mut self,
        instrument: StreamInstrument,
        feed_type: FeedType,
        created_at: OffsetDateTime,
    ) -> SubscriptionId {
        let mut id = SubscriptionId::generate();
        while self.contains(&id) {
            id = SubscriptionId::generate();
        }
        self.records.push(SubscriptionRecord {
            id: id.clone(),
            instrument,
            feed_type,
            created_at,
        });
        id
    }

    /// Removes a subscription; returns false when the id is unknown.
    pub fn remove(&mut self, id: &SubscriptionId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| &record.id != id);
        self.records.len() != before
    }

    /// Returns true when the id is registered.
    #[must_use]
    pub fn contains(&self, id: &SubscriptionId) -> bool {
        self.records.iter().any(|record| &record.id == id)
    }

    /// Returns all records in insertion order.
    #[must_use]
    pub fn all(&self) -> &[SubscriptionRecord] {
        &self.records
    }

    /// Returns the number of active records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no subscription is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
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

    use time::macros::datetime;
    use uuid::Uuid;

    use super::FeedType;
    use super::StreamInstrument;
    use super::SubscriptionId;
    use super::SubscriptionRegistry;

    /// Returns the NIFTY stream instrument.
    fn nifty() -> StreamInstrument {
        StreamInstrument {
            exchange_segment: "IDX_I".to_string(),
            security_id: "13".to_string(),
            symbol: "NIFTY".to_string(),
        }
    }

    #[test]
    fn generated_ids_are_version_four() {
        let id = SubscriptionId::generate();
        let text = id.as_str();
        assert_eq!(text.len(), 36);
        let groups: Vec<&str> = text.split('-').collect();
        let lengths: Vec<usize> = groups.iter().map(|group| group.len()).collect();
        assert_eq!(lengths, vec![8, 4, 4, 4, 12]);
        assert!(groups[2].starts_with('4'));
        assert!(matches!(groups[3].chars().next(), Some('8' | '9' | 'a' | 'b')));
        assert!(text.chars().all(|ch| ch == '-' || ch.is_ascii_hexdigit()));
        assert_eq!(Uuid::parse_str(text).unwrap().get_version_num(), 4);
        assert_ne!(SubscriptionId::generate(), id);
    }

    #[test]
    fn registry_preserves_insertion_order_and_removes() {
        let mut registry = SubscriptionRegistry::new();
        let first = registry.add(nifty(), FeedType::Ltp);
        let second = registry.add(nifty(), FeedType::Full);
        assert_ne!(first, second);
        let ids: Vec<_> = registry.all().iter().map(|record| record.id.clone()).collect();
        assert_eq!(ids, vec![first.clone(), second.clone()]);

        assert!(registry.remove(&first));
        assert!(!registry.remove(&first));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.all()[0].id, second);
    }

    #[test]
    fn unknown_id_is_not_removed() {
        let mut registry = SubscriptionRegistry::new();
        assert!(!registry.remove(&SubscriptionId::new("missing")));
        assert!(registry.is_empty());
    }

    #[test]
    fn records_serialize_with_rfc3339_timestamp() {
        let mut registry = SubscriptionRegistry::new();
        registry.add_at(nifty(), FeedType::Quote, datetime!(2024-01-02 03:04:05 UTC));
        let value = serde_json::to_value(&registry.all()[0]).unwrap();
        assert_eq!(value["created_at"], "2024-01-02T03:04:05Z");
        assert_eq!(value["feed_type"], "QUOTE");
        assert_eq!(value["instrument"]["symbol"], "NIFTY");
        assert_eq!(FeedType::parse("FULL"), Some(FeedType::Full));
        assert_eq!(FeedType::parse("ltp"), None);
    }
}
