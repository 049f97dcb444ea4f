//! Historical rate data
//!
//! # Components
//!
//! - **series**: synthetic series generation and window/nearest queries
//! - **timeframe**: chart timeframes (1D, 5D, 1M, 3M)
//! - **store**: explicit per-pair series cache
//! - **history**: date/time search over a pair's history
//! - **summary**: min/max/mean/change of a series
//! - **export**: CSV output
//!
//! # Example
//!
//! ```rust
//! use spread_checker::data::{filter_window_at, generate_at, nearest};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let now = 1_704_110_400_000;
//! let mut rng = StdRng::seed_from_u64(42);
//! let series = generate_at("GBPUSD", 1.3550, 5, now, &mut rng).unwrap();
//! assert_eq!(series.len(), 5 * 24 + 1);
//!
//! let last_day = filter_window_at(&series, 1, now);
//! assert_eq!(last_day.len(), 25);
//!
//! let point = nearest(&series, now - 90 * 60 * 1000).unwrap();
//! assert_eq!(point.timestamp, now - 2 * 60 * 60 * 1000);
//! ```

pub mod export;
pub mod history;
pub mod series;
pub mod store;
pub mod summary;
pub mod timeframe;

pub use export::write_series_csv;
pub use history::{lookup, parse_time_of_day, search_at, target_timestamp, HistoricalMatch, SEARCH_SPAN_DAYS};
pub use series::{
    filter_centered, filter_window, filter_window_at, generate, generate_at, nearest, RandomWalk,
    DEFAULT_BAND, DEFAULT_HISTORY_DAYS, DEFAULT_VOLATILITY, MAX_HISTORY_DAYS,
};
pub use store::SeriesStore;
pub use summary::{summarize, SeriesSummary};
pub use timeframe::Timeframe;
