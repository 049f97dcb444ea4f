//! Rate comparison engine
//!
//! Compares your quoted rate (plus an optional margin in pips) with a
//! competitor's rate for a recurring trade, and reports the pip gap, the
//! cost of buying the notional at each rate and the per-trade and annual
//! savings. All magnitudes are reported unsigned; the direction lives in
//! [`RateComparisonResult::is_advantage`].

use super::input::{InputField, RateComparisonInput};
use crate::error::{Result, SpreadError};
use crate::format::to_fixed;
use crate::types::{Cash, Rate, PIPS_PER_UNIT};
use serde::{Deserialize, Serialize};

/// Default margin used by [`margin_adjustment`] (0.5%)
pub const DEFAULT_MARGIN_PERCENT: f64 = 0.005;

/// Outcome of one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateComparisonResult {
    /// Absolute rate gap, 4 decimals
    pub price_difference: String,
    /// Absolute rate gap in pips, 1 decimal
    pub pips_advantage: String,
    /// Cost to buy the notional at the competitor's rate
    pub cost_at_competitor_rate: Cash,
    /// Cost to buy the notional at your effective rate
    pub cost_at_your_rate: Cash,
    /// Absolute per-trade cost difference, 2 decimals
    pub savings_per_trade: String,
    /// Absolute annual cost difference, 2 decimals
    pub annual_savings: String,
    /// Per-trade difference as a share of the competitor's cost, 2 decimals
    pub percentage_savings: String,
    /// True when your effective rate is strictly cheaper than the competitor's
    pub is_advantage: bool,
}

/// Pip distance between two rates
pub fn calculate_pips(rate1: Rate, rate2: Rate) -> f64 {
    ((rate1 - rate2) * PIPS_PER_UNIT).abs()
}

/// Rate with `pips` added
pub fn effective_rate(rate: Rate, margin_pips: i32) -> Rate {
    rate + f64::from(margin_pips) / PIPS_PER_UNIT
}

/// Rate markup for a proportional margin, e.g. 0.5% of the base rate
pub fn margin_adjustment(base_rate: Rate, margin_percent: f64) -> Rate {
    base_rate * margin_percent
}

fn check_positive(input: &RateComparisonInput) -> Result<()> {
    for field in InputField::REQUIRED {
        let value = input.value(field);
        if !(value.is_finite() && value > 0.0) {
            return Err(SpreadError::InvalidInput { field, value });
        }
    }
    Ok(())
}

/// Compare your rate with the competitor's.
///
/// Input is expected to have passed [`validate`](super::validate); it is
/// checked again here and the first non-positive field is reported as
/// [`SpreadError::InvalidInput`]. A margin that drives the effective rate
/// to zero or below is reported against [`InputField::MarginPips`].
pub fn compare(input: &RateComparisonInput) -> Result<RateComparisonResult> {
    check_positive(input)?;

    let your_rate = effective_rate(input.your_rate, input.margin_pips);
    if !(your_rate.is_finite() && your_rate > 0.0) {
        return Err(SpreadError::InvalidInput {
            field: InputField::MarginPips,
            value: f64::from(input.margin_pips),
        });
    }

    // positive: competitor quotes more quote currency per unit than you
    let rate_diff = input.competitor_rate - your_rate;
    let pips = calculate_pips(input.competitor_rate, your_rate);

    let cost_at_competitor_rate = input.trade_amount / input.competitor_rate;
    let cost_at_your_rate = input.trade_amount / your_rate;

    let savings_per_trade = cost_at_competitor_rate - cost_at_your_rate;
    let annual_savings = savings_per_trade * f64::from(input.trades_per_year);
    let percentage_savings = savings_per_trade.abs() / cost_at_competitor_rate * 100.0;

    log::debug!(
        "compare: effective {:.4} vs competitor {:.4}, {:.1} pips, savings/trade {:.2}",
        your_rate,
        input.competitor_rate,
        pips,
        savings_per_trade
    );

    Ok(RateComparisonResult {
        price_difference: to_fixed(rate_diff.abs(), 4),
        pips_advantage: to_fixed(pips, 1),
        cost_at_competitor_rate,
        cost_at_your_rate,
        savings_per_trade: to_fixed(savings_per_trade.abs(), 2),
        annual_savings: to_fixed(annual_savings.abs(), 2),
        percentage_savings: to_fixed(percentage_savings, 2),
        is_advantage: savings_per_trade > 0.0,
    })
}
