//! Core types and constants

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Epoch milliseconds, the timestamp unit of every series
pub type TimestampMillis = i64;

/// Rate quoted as quote currency per unit of base currency
pub type Rate = f64;

/// Money amount
pub type Cash = f64;

/// One pip: 1/10,000th of a quoted rate
pub const PIP: f64 = 0.0001;

/// Pips per unit of rate
pub const PIPS_PER_UNIT: f64 = 10_000.0;

pub const HOUR_MS: i64 = 60 * 60 * 1000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// One observation of a pair's price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: TimestampMillis,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: TimestampMillis, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Timestamp as a UTC datetime
    pub fn datetime(&self) -> DateTime<Utc> {
        millis_to_datetime(self.timestamp)
    }
}

/// Ordered, timestamp-sorted sequence of price points for one pair
pub type Series = Vec<PricePoint>;

/// Convert epoch millis to a UTC datetime; out-of-range values map to the epoch
pub fn millis_to_datetime(millis: TimestampMillis) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).single().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_point_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let point = PricePoint::new(dt.timestamp_millis(), 1.355);
        assert_eq!(point.datetime(), dt);
    }

    #[test]
    fn test_day_ms() {
        assert_eq!(DAY_MS, 86_400_000);
        assert!((PIP * PIPS_PER_UNIT - 1.0).abs() < 1e-12);
    }
}
