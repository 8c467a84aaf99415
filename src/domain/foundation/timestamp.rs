//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_order_chronologically() {
        let earlier: Timestamp = serde_json::from_str("\"2024-01-01T00:00:00Z\"").unwrap();
        let later = Timestamp::now();
        assert!(earlier < later);
    }

    #[test]
    fn timestamp_round_trips_as_rfc3339() {
        let ts: Timestamp = serde_json::from_str("\"2024-03-05T12:00:00Z\"").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-03-05T12:00:00Z\"");
    }
}
