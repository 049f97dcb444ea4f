//! Synthetic hourly price series and window/nearest queries
//!
//! Series are produced by a bounded random walk around a pair's base rate
//! and queried by the chart layer: a trailing window for the selected
//! timeframe, a window centred on a searched timestamp, and the point
//! closest to a timestamp.

use crate::error::{Result, SpreadError};
use crate::format::round_to;
use crate::types::{PricePoint, Series, TimestampMillis, DAY_MS, HOUR_MS};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Maximum relative move per hourly step is half of this
pub const DEFAULT_VOLATILITY: f64 = 0.005;

/// Prices stay within ±15% of the base price
pub const DEFAULT_BAND: f64 = 0.15;

/// Length of the full history kept per pair
pub const DEFAULT_HISTORY_DAYS: u32 = 90;

/// Longest history a single walk will generate (about ten years)
pub const MAX_HISTORY_DAYS: u32 = 3650;

/// Decimal places stored for every generated price
pub const PRICE_DECIMALS: u32 = 4;

/// Bounded multiplicative random walk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomWalk {
    pub volatility: f64,
    pub band: f64,
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self {
            volatility: DEFAULT_VOLATILITY,
            band: DEFAULT_BAND,
        }
    }
}

impl RandomWalk {
    pub fn new(volatility: f64, band: f64) -> Result<Self> {
        if !(volatility > 0.0 && volatility < 1.0) {
            return Err(SpreadError::InvalidData(format!(
                "volatility must be in (0, 1), got {}",
                volatility
            )));
        }
        if !(band > 0.0 && band < 1.0) {
            return Err(SpreadError::InvalidData(format!(
                "band must be in (0, 1), got {}",
                band
            )));
        }
        Ok(Self { volatility, band })
    }

    /// Price bounds for a base price
    pub fn bounds(&self, base_price: f64) -> (f64, f64) {
        (base_price * (1.0 - self.band), base_price * (1.0 + self.band))
    }

    /// One hourly step from `price`, clamped to the band and rounded
    pub fn step<R: Rng + ?Sized>(&self, price: f64, base_price: f64, rng: &mut R) -> f64 {
        let change = (rng.gen::<f64>() - 0.5) * self.volatility;
        let (min_price, max_price) = self.bounds(base_price);
        let next = (price * (1.0 + change)).clamp(min_price, max_price);
        round_to(next, PRICE_DECIMALS)
    }

    /// Hourly series of `days * 24 + 1` points ending at `now`
    pub fn generate<R: Rng + ?Sized>(
        &self,
        base_price: f64,
        days: u32,
        now: TimestampMillis,
        rng: &mut R,
    ) -> Result<Series> {
        if !(base_price.is_finite() && base_price > 0.0) {
            return Err(SpreadError::InvalidData(format!(
                "base price must be a positive number, got {}",
                base_price
            )));
        }
        if days > MAX_HISTORY_DAYS {
            return Err(SpreadError::InvalidData(format!(
                "history of {} days exceeds the {} day limit",
                days, MAX_HISTORY_DAYS
            )));
        }

        let hours = i64::from(days) * 24;
        let mut series = Vec::with_capacity(hours as usize + 1);
        let mut price = base_price;

        for i in (0..=hours).rev() {
            price = self.step(price, base_price, rng);
            series.push(PricePoint::new(now.saturating_sub(i * HOUR_MS), price));
        }

        // already ascending; stable sort keeps that an invariant
        series.sort_by_key(|p| p.timestamp);
        Ok(series)
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate a series ending now. A seed makes the walk reproducible.
pub fn generate(pair_id: &str, base_price: f64, days: u32, seed: Option<u64>) -> Result<Series> {
    let mut rng = make_rng(seed);
    generate_at(pair_id, base_price, days, Utc::now().timestamp_millis(), &mut rng)
}

/// Generate a series ending at `now` with the default walk and the given rng
pub fn generate_at<R: Rng + ?Sized>(
    pair_id: &str,
    base_price: f64,
    days: u32,
    now: TimestampMillis,
    rng: &mut R,
) -> Result<Series> {
    let series = RandomWalk::default().generate(base_price, days, now, rng)?;
    log::info!(
        "Generated {} points for {} over {} days from base {:.4}",
        series.len(),
        pair_id,
        days,
        base_price
    );
    Ok(series)
}

/// Points within the last `days` days
pub fn filter_window(series: &[PricePoint], days: u32) -> Series {
    filter_window_at(series, days, Utc::now().timestamp_millis())
}

/// Points with `timestamp >= now - days`
pub fn filter_window_at(series: &[PricePoint], days: u32, now: TimestampMillis) -> Series {
    let cutoff = now.saturating_sub(i64::from(days) * DAY_MS);
    series
        .iter()
        .filter(|p| p.timestamp >= cutoff)
        .copied()
        .collect()
}

/// Points within `span_days / 2` days either side of `center`, inclusive
pub fn filter_centered(series: &[PricePoint], center: TimestampMillis, span_days: u32) -> Series {
    let half_span = i64::from(span_days) * DAY_MS / 2;
    let start = center.saturating_sub(half_span);
    let end = center.saturating_add(half_span);
    series
        .iter()
        .filter(|p| p.timestamp >= start && p.timestamp <= end)
        .copied()
        .collect()
}

/// Point closest in time to `target`; the earliest wins a tie
pub fn nearest(series: &[PricePoint], target: TimestampMillis) -> Option<PricePoint> {
    let mut points = series.iter();
    let mut closest = *points.next()?;
    let mut min_diff = closest.timestamp.abs_diff(target);

    for point in points {
        let diff = point.timestamp.abs_diff(target);
        if diff < min_diff {
            min_diff = diff;
            closest = *point;
        }
    }

    Some(closest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: TimestampMillis = 1_704_110_400_000; // 2024-01-01T12:00:00Z

    fn flat_series(len: i64) -> Series {
        (0..len)
            .map(|i| PricePoint::new(NOW - (len - 1 - i) * HOUR_MS, 1.0 + i as f64 * 0.0001))
            .collect()
    }

    #[test]
    fn test_generate_length_and_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = generate_at("TEST", 1.0, 1, NOW, &mut rng).unwrap();

        assert_eq!(series.len(), 25);
        assert_eq!(series.first().unwrap().timestamp, NOW - 24 * HOUR_MS);
        assert_eq!(series.last().unwrap().timestamp, NOW);
        assert!(series.iter().all(|p| (0.85..=1.15).contains(&p.price)));
        assert!(series.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_generate_hourly_spacing() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = generate_at("GBPUSD", 1.3550, 3, NOW, &mut rng).unwrap();
        assert_eq!(series.len(), 3 * 24 + 1);
        assert!(series.windows(2).all(|w| w[1].timestamp - w[0].timestamp == HOUR_MS));
    }

    #[test]
    fn test_generate_prices_rounded() {
        let mut rng = StdRng::seed_from_u64(3);
        let series = generate_at("EURUSD", 1.0825, 2, NOW, &mut rng).unwrap();
        for p in &series {
            assert_eq!(round_to(p.price, PRICE_DECIMALS), p.price);
        }
    }

    #[test]
    fn test_step_is_bounded() {
        let walk = RandomWalk::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut price = 1.0;
        for _ in 0..1000 {
            let next = walk.step(price, 1.0, &mut rng);
            assert!((next / price - 1.0).abs() <= 0.0026);
            price = next;
        }
    }

    #[test]
    fn test_step_clamps_at_band() {
        let walk = RandomWalk::new(0.5, 0.15).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut price = 1.0;
        for _ in 0..500 {
            price = walk.step(price, 1.0, &mut rng);
            assert!((0.85..=1.15).contains(&price));
        }
    }

    #[test]
    fn test_seeded_generation_reproducible() {
        let a = generate_at("GBPUSD", 1.355, 5, NOW, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_at("GBPUSD", 1.355, 5, NOW, &mut StdRng::seed_from_u64(42)).unwrap();
        let c = generate_at("GBPUSD", 1.355, 5, NOW, &mut StdRng::seed_from_u64(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_days_single_point() {
        let series = generate_at("X", 1.2, 0, NOW, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].timestamp, NOW);
    }

    #[test]
    fn test_generate_rejects_bad_base() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_at("X", 0.0, 1, NOW, &mut rng).is_err());
        assert!(generate_at("X", -1.0, 1, NOW, &mut rng).is_err());
        assert!(generate_at("X", f64::NAN, 1, NOW, &mut rng).is_err());
    }

    #[test]
    fn test_generate_rejects_overlong_history() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate_at("X", 1.0, MAX_HISTORY_DAYS + 1, NOW, &mut rng),
            Err(SpreadError::InvalidData(_))
        ));
        assert!(generate_at("X", 1.0, u32::MAX, NOW, &mut rng).is_err());
    }

    #[test]
    fn test_generate_near_timestamp_limits() {
        let mut rng = StdRng::seed_from_u64(0);
        let series = generate_at("X", 1.0, 1, i64::MIN + HOUR_MS, &mut rng).unwrap();
        assert_eq!(series.len(), 25);
        assert_eq!(series[0].timestamp, i64::MIN);
        assert_eq!(series[24].timestamp, i64::MIN + HOUR_MS);
    }

    #[test]
    fn test_queries_at_timestamp_limits() {
        let series = vec![
            PricePoint::new(i64::MIN, 1.0),
            PricePoint::new(0, 1.1),
            PricePoint::new(i64::MAX, 1.2),
        ];

        assert_eq!(filter_centered(&series, i64::MAX, 2), vec![series[2]]);
        assert_eq!(filter_centered(&series, i64::MIN, 2), vec![series[0]]);
        assert_eq!(filter_centered(&[PricePoint::new(0, 1.0)], i64::MAX, 2), vec![]);
        assert_eq!(filter_centered(&series, 0, u32::MAX).len(), 1);

        assert_eq!(filter_window_at(&series, 1, i64::MIN), series);
        assert_eq!(filter_window_at(&series, u32::MAX, 0), series[1..].to_vec());
        assert_eq!(filter_window_at(&series, 1, i64::MAX), vec![series[2]]);
    }

    #[test]
    fn test_random_walk_new_validates() {
        assert!(RandomWalk::new(0.0, 0.15).is_err());
        assert!(RandomWalk::new(0.005, 1.0).is_err());
        assert!(RandomWalk::new(0.005, 0.15).is_ok());
    }

    #[test]
    fn test_filter_window_suffix() {
        let series = flat_series(49);
        let window = filter_window_at(&series, 1, NOW);
        assert_eq!(window.len(), 25);
        assert_eq!(window.first().unwrap().timestamp, NOW - DAY_MS);
        assert_eq!(&series[24..], window.as_slice());
    }

    #[test]
    fn test_filter_window_empty_cases() {
        assert!(filter_window_at(&[], 5, NOW).is_empty());
        let series = flat_series(10);
        assert!(filter_window_at(&series, 1, NOW + 2 * DAY_MS).is_empty());
    }

    #[test]
    fn test_filter_centered_inclusive() {
        let series = flat_series(24 * 10 + 1);
        let center = NOW - 5 * DAY_MS;
        let window = filter_centered(&series, center, 2);

        assert_eq!(window.len(), 49);
        assert_eq!(window.first().unwrap().timestamp, center - DAY_MS);
        assert_eq!(window.last().unwrap().timestamp, center + DAY_MS);
    }

    #[test]
    fn test_filter_centered_odd_span() {
        let series = flat_series(24 * 10 + 1);
        let center = NOW - 5 * DAY_MS;
        let window = filter_centered(&series, center, 5);
        // ±2.5 days of hourly points
        assert_eq!(window.len(), 121);
    }

    #[test]
    fn test_nearest() {
        let series = flat_series(5);
        let hit = nearest(&series, NOW - HOUR_MS - 10).unwrap();
        assert_eq!(hit.timestamp, NOW - HOUR_MS);

        assert_eq!(nearest(&series, NOW + DAY_MS).unwrap().timestamp, NOW);
        assert_eq!(
            nearest(&series, 0).unwrap().timestamp,
            series[0].timestamp
        );
        assert!(nearest(&[], NOW).is_none());
    }

    #[test]
    fn test_nearest_tie_prefers_earliest() {
        let series = vec![PricePoint::new(0, 1.0), PricePoint::new(HOUR_MS, 2.0)];
        let hit = nearest(&series, HOUR_MS / 2).unwrap();
        assert_eq!(hit.price, 1.0);
    }

    #[test]
    fn test_nearest_single_point() {
        let series = vec![PricePoint::new(NOW, 1.2345)];
        for target in [i64::MIN, 0, NOW, i64::MAX] {
            assert_eq!(nearest(&series, target), Some(series[0]));
        }
    }
}
