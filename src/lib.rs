//! # Spread Checker
//!
//! FX spread checker: compares a quoted rate against a competitor's rate and
//! reports the pip gap and the savings it is worth over a year of trades,
//! alongside a synthetic hourly rate history for charting.
//!
//! ## Example
//!
//! ```rust
//! use spread_checker::prelude::*;
//!
//! let raw = RawComparisonInput::new("1.3550", "1.3540", "500000", "52");
//! let input = validate(&raw).unwrap();
//! let result = compare(&input).unwrap();
//!
//! assert_eq!(result.price_difference, "0.0010");
//! assert_eq!(result.annual_savings, "14171.49");
//! assert!(result.is_advantage);
//! ```

pub mod clock;
pub mod comparison;
pub mod config;
pub mod currency;
pub mod data;
pub mod error;
pub mod format;
pub mod live;
pub mod types;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::comparison::{
        compare, validate, validation_messages, ComparisonRecord, InputField,
        RateComparisonInput, RateComparisonResult, RawComparisonInput,
    };
    pub use crate::config::Config;
    pub use crate::currency::{Currency, CurrencyPair, FxPair};
    pub use crate::data::{
        filter_centered, filter_window, generate, nearest, SeriesStore, Timeframe,
    };
    pub use crate::error::{Result, SpreadError};
    pub use crate::live::{LiveQuote, LiveRateTicker};
    pub use crate::types::*;
}
