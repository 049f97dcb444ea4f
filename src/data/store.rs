//! Per-pair series cache
//!
//! Each pair's full history is generated on first use and reused until it
//! is explicitly invalidated or regenerated. The cache is an ordinary value
//! owned by the caller; there is no process-wide state.

use super::series::{filter_window_at, RandomWalk, DEFAULT_HISTORY_DAYS};
use super::timeframe::Timeframe;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::currency::{CurrencyPair, FxPair};
use crate::error::{Result, SpreadError};
use crate::types::Series;
use hashbrown::HashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

pub struct SeriesStore {
    pairs: HashMap<String, FxPair>,
    series: HashMap<String, Series>,
    walk: RandomWalk,
    history_days: u32,
    rng: StdRng,
    clock: Arc<dyn Clock>,
}

impl SeriesStore {
    /// Store over `pairs` with an entropy-seeded walk on the system clock
    pub fn new(pairs: Vec<FxPair>) -> Self {
        Self::with_rng(pairs, StdRng::from_entropy())
    }

    /// Store whose generated series are reproducible for a given clock
    pub fn seeded(pairs: Vec<FxPair>, seed: u64) -> Self {
        Self::with_rng(pairs, StdRng::seed_from_u64(seed))
    }

    fn with_rng(pairs: Vec<FxPair>, rng: StdRng) -> Self {
        Self {
            pairs: pairs.into_iter().map(|p| (p.symbol(), p)).collect(),
            series: HashMap::new(),
            walk: RandomWalk::default(),
            history_days: DEFAULT_HISTORY_DAYS,
            rng,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let pairs = config.fx_pairs()?;
        let store = match config.seed {
            Some(seed) => Self::seeded(pairs, seed),
            None => Self::new(pairs),
        };
        Ok(store
            .with_walk(config.walk()?)
            .with_history_days(config.history_days))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_walk(mut self, walk: RandomWalk) -> Self {
        self.walk = walk;
        self
    }

    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }

    pub fn history_days(&self) -> u32 {
        self.history_days
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Cache key for a pair written as `GBPUSD` or `GBP/USD`
    fn key(&self, symbol: &str) -> Result<String> {
        let key = symbol.parse::<CurrencyPair>()?.symbol();
        if self.pairs.contains_key(&key) {
            Ok(key)
        } else {
            Err(SpreadError::UnknownPair(symbol.to_string()))
        }
    }

    pub fn pair(&self, symbol: &str) -> Result<&FxPair> {
        let key = self.key(symbol)?;
        self.pairs
            .get(&key)
            .ok_or_else(|| SpreadError::UnknownPair(symbol.to_string()))
    }

    /// Known pair symbols, sorted
    pub fn available_pairs(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.pairs.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn is_cached(&self, symbol: &str) -> bool {
        self.key(symbol)
            .map(|key| self.series.contains_key(&key))
            .unwrap_or(false)
    }

    fn build(&mut self, key: &str) -> Result<Series> {
        let base_rate = self
            .pairs
            .get(key)
            .map(|p| p.base_rate)
            .ok_or_else(|| SpreadError::UnknownPair(key.to_string()))?;
        let now = self.clock.now_millis();
        let series = self
            .walk
            .generate(base_rate, self.history_days, now, &mut self.rng)?;
        log::info!(
            "Generated {} day history for {} ({} points)",
            self.history_days,
            key,
            series.len()
        );
        Ok(series)
    }

    /// Full history for a pair, generating it on first request
    pub fn get_or_generate(&mut self, symbol: &str) -> Result<&Series> {
        let key = self.key(symbol)?;
        if !self.series.contains_key(&key) {
            let series = self.build(&key)?;
            self.series.insert(key.clone(), series);
        }
        self.series
            .get(&key)
            .ok_or_else(|| SpreadError::UnknownPair(symbol.to_string()))
    }

    /// Replace a pair's history with a freshly generated one
    pub fn regenerate(&mut self, symbol: &str) -> Result<&Series> {
        let key = self.key(symbol)?;
        let series = self.build(&key)?;
        self.series.insert(key.clone(), series);
        self.series
            .get(&key)
            .ok_or_else(|| SpreadError::UnknownPair(symbol.to_string()))
    }

    /// Drop a pair's cached history. Returns whether anything was cached.
    pub fn invalidate(&mut self, symbol: &str) -> bool {
        match self.key(symbol) {
            Ok(key) => self.series.remove(&key).is_some(),
            Err(_) => false,
        }
    }

    pub fn invalidate_all(&mut self) {
        self.series.clear();
    }

    /// Trailing `timeframe` window of a pair's history, as of the store clock
    pub fn chart(&mut self, symbol: &str, timeframe: Timeframe) -> Result<Series> {
        let now = self.clock.now_millis();
        let series = self.get_or_generate(symbol)?;
        Ok(filter_window_at(series, timeframe.days(), now))
    }
}
