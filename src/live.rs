//! Live rate ticker
//!
//! Display-only rate updates: every interval the pair's reference rate is
//! perturbed by a small random amount. Time comes from a [`Clock`] and
//! randomness from the caller, so the ticker can be stepped deterministically.

use crate::clock::Clock;
use crate::currency::FxPair;
use crate::format::{round_to, to_fixed};
use crate::types::{Rate, TimestampMillis};
use chrono::Duration;
use rand::Rng;
use serde::Serialize;

/// Default ticker interval
pub const DEFAULT_TICK_INTERVAL_SECS: i64 = 5;

/// Longest accepted ticker interval, one day
pub const MAX_TICK_INTERVAL_SECS: i64 = 86_400;

/// Default absolute fluctuation span (±0.001 around the base rate)
pub const DEFAULT_MAX_FLUCTUATION: f64 = 0.002;

/// Base rate moved by up to ±`max_fluctuation / 2`, rounded to 4 decimals
pub fn fluctuate<R: Rng + ?Sized>(base_rate: Rate, max_fluctuation: f64, rng: &mut R) -> Rate {
    let fluctuation = (rng.gen::<f64>() - 0.5) * max_fluctuation;
    round_to(base_rate + fluctuation, 4)
}

/// Base rate scaled by up to ±`max_fluctuation / 2` of itself, unrounded
pub fn fluctuate_proportional<R: Rng + ?Sized>(
    base_rate: Rate,
    max_fluctuation: f64,
    rng: &mut R,
) -> Rate {
    let fluctuation = (rng.gen::<f64>() - 0.5) * max_fluctuation;
    base_rate + base_rate * fluctuation
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveQuote {
    pub symbol: String,
    pub rate: Rate,
    pub timestamp: TimestampMillis,
}

impl LiveQuote {
    /// Rate to 4 decimals, as shown next to the rate input
    pub fn formatted(&self) -> String {
        to_fixed(self.rate, 4)
    }
}

#[derive(Debug, Clone)]
pub struct LiveRateTicker {
    pair: FxPair,
    interval: Duration,
    max_fluctuation: f64,
    rate: Rate,
    last_tick: Option<TimestampMillis>,
}

impl LiveRateTicker {
    pub fn new(pair: FxPair, interval: Duration) -> Self {
        Self {
            pair,
            interval,
            max_fluctuation: DEFAULT_MAX_FLUCTUATION,
            rate: pair.base_rate,
            last_tick: None,
        }
    }

    pub fn with_max_fluctuation(mut self, max_fluctuation: f64) -> Self {
        self.max_fluctuation = max_fluctuation;
        self
    }

    pub fn pair(&self) -> &FxPair {
        &self.pair
    }

    pub fn rate(&self) -> Rate {
        self.rate
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn quote(&self, timestamp: TimestampMillis) -> LiveQuote {
        LiveQuote {
            symbol: self.pair.symbol(),
            rate: self.rate,
            timestamp,
        }
    }

    /// Emit a new quote if a full interval has passed since the last one.
    ///
    /// The first poll only starts the interval. Polls that come late still
    /// emit a single quote; missed ticks are not replayed.
    pub fn poll<R: Rng + ?Sized>(&mut self, clock: &dyn Clock, rng: &mut R) -> Option<LiveQuote> {
        let now = clock.now_millis();
        let last = match self.last_tick {
            Some(last) => last,
            None => {
                self.last_tick = Some(now);
                return None;
            }
        };

        if now - last < self.interval.num_milliseconds() {
            return None;
        }

        self.rate = fluctuate(self.pair.base_rate, self.max_fluctuation, rng);
        self.last_tick = Some(now);
        log::debug!("{} live rate {:.4}", self.pair.symbol(), self.rate);
        Some(self.quote(now))
    }

    /// Switch pairs: the rate resets to the new base rate, which is
    /// returned as a quote, and the interval restarts.
    pub fn set_pair(&mut self, pair: FxPair, clock: &dyn Clock) -> LiveQuote {
        let now = clock.now_millis();
        self.pair = pair;
        self.rate = pair.base_rate;
        self.last_tick = Some(now);
        self.quote(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::currency::default_pairs;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ticker() -> (LiveRateTicker, ManualClock, StdRng) {
        let pair = default_pairs()[0];
        let ticker = LiveRateTicker::new(pair, Duration::seconds(DEFAULT_TICK_INTERVAL_SECS));
        (ticker, ManualClock::from_millis(0), StdRng::seed_from_u64(9))
    }

    #[test]
    fn test_fluctuate_bounded_and_rounded() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let rate = fluctuate(1.3550, DEFAULT_MAX_FLUCTUATION, &mut rng);
            assert!((rate - 1.3550).abs() <= 0.00105);
            assert_eq!(round_to(rate, 4), rate);
        }
    }

    #[test]
    fn test_fluctuate_proportional_bounded() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            let rate = fluctuate_proportional(2.0, 0.002, &mut rng);
            assert!((rate - 2.0).abs() <= 0.002 + 1e-12);
        }
    }

    #[test]
    fn test_poll_waits_for_interval() {
        let (mut ticker, clock, mut rng) = ticker();
        assert!(ticker.poll(&clock, &mut rng).is_none());
        assert_eq!(ticker.rate(), 1.3550);

        clock.advance(Duration::seconds(4));
        assert!(ticker.poll(&clock, &mut rng).is_none());

        clock.advance(Duration::seconds(1));
        let quote = ticker.poll(&clock, &mut rng).unwrap();
        assert_eq!(quote.symbol, "GBPUSD");
        assert_eq!(quote.timestamp, 5_000);
        assert_eq!(quote.rate, ticker.rate());
        assert_eq!(quote.formatted().len(), 6);

        assert!(ticker.poll(&clock, &mut rng).is_none());
    }

    #[test]
    fn test_late_poll_emits_once() {
        let (mut ticker, clock, mut rng) = ticker();
        ticker.poll(&clock, &mut rng);
        clock.advance(Duration::seconds(60));
        assert!(ticker.poll(&clock, &mut rng).is_some());
        assert!(ticker.poll(&clock, &mut rng).is_none());
    }

    #[test]
    fn test_set_pair_resets_rate() {
        let (mut ticker, clock, mut rng) = ticker();
        ticker.poll(&clock, &mut rng);
        clock.advance(Duration::seconds(5));
        ticker.poll(&clock, &mut rng).unwrap();

        let eurusd = default_pairs()[2];
        let quote = ticker.set_pair(eurusd, &clock);
        assert_eq!(quote.rate, 1.0825);
        assert_eq!(quote.formatted(), "1.0825");
        assert_eq!(ticker.pair().symbol(), "EURUSD");

        clock.advance(Duration::seconds(4));
        assert!(ticker.poll(&clock, &mut rng).is_none());
    }
}
