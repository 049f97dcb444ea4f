//! Rate comparison
//!
//! # Components
//!
//! - **input**: typed and numeric comparison inputs
//! - **validation**: field-level checks on typed input
//! - **engine**: pip, cost and savings computation
//! - **record**: serialisable capture of a completed comparison
//!
//! # Example
//!
//! ```rust
//! use spread_checker::comparison::{compare, validate, RawComparisonInput};
//!
//! let raw = RawComparisonInput::new("1.3550", "1.3540", "500000", "52");
//! let input = validate(&raw).unwrap();
//! let result = compare(&input).unwrap();
//!
//! assert_eq!(result.pips_advantage, "10.0");
//! assert_eq!(result.savings_per_trade, "272.53");
//! assert!(result.is_advantage);
//! ```

pub mod engine;
pub mod input;
pub mod record;
pub mod validation;

pub use engine::{
    calculate_pips, compare, effective_rate, margin_adjustment, RateComparisonResult,
    DEFAULT_MARGIN_PERCENT,
};
pub use input::{InputField, RateComparisonInput, RawComparisonInput, MARGIN_PIP_OPTIONS};
pub use record::ComparisonRecord;
pub use validation::{validate, validation_messages, FieldError, ValidationErrors};
