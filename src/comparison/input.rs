//! Comparison inputs, as typed by the user and as validated numbers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Margin choices offered by the calculator, in pips
pub const MARGIN_PIP_OPTIONS: [i32; 6] = [0, 10, 20, 30, 40, 50];

/// Fields of a rate comparison, in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    YourRate,
    CompetitorRate,
    TradeAmount,
    TradesPerYear,
    MarginPips,
}

impl InputField {
    /// The four required fields, in the order they are checked
    pub const REQUIRED: [InputField; 4] = [
        InputField::YourRate,
        InputField::CompetitorRate,
        InputField::TradeAmount,
        InputField::TradesPerYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::YourRate => "your_rate",
            InputField::CompetitorRate => "competitor_rate",
            InputField::TradeAmount => "trade_amount",
            InputField::TradesPerYear => "trades_per_year",
            InputField::MarginPips => "margin_pips",
        }
    }

    /// User-facing message shown when the field is missing or not positive
    pub fn requirement_message(&self) -> &'static str {
        match self {
            InputField::YourRate => "Your rate must be a positive number",
            InputField::CompetitorRate => "Competitor rate must be a positive number",
            InputField::TradeAmount => "Trade amount must be a positive number",
            InputField::TradesPerYear => "Trades per year must be a positive number",
            InputField::MarginPips => "Margin must keep the effective rate positive",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comparison fields exactly as entered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawComparisonInput {
    pub your_rate: String,
    pub competitor_rate: String,
    pub trade_amount: String,
    pub trades_per_year: String,
    #[serde(default)]
    pub margin_pips: i32,
}

impl RawComparisonInput {
    pub fn new(
        your_rate: impl Into<String>,
        competitor_rate: impl Into<String>,
        trade_amount: impl Into<String>,
        trades_per_year: impl Into<String>,
    ) -> Self {
        Self {
            your_rate: your_rate.into(),
            competitor_rate: competitor_rate.into(),
            trade_amount: trade_amount.into(),
            trades_per_year: trades_per_year.into(),
            margin_pips: 0,
        }
    }

    pub fn with_margin_pips(mut self, margin_pips: i32) -> Self {
        self.margin_pips = margin_pips;
        self
    }

    /// Raw text of a required field
    pub fn text(&self, field: InputField) -> &str {
        match field {
            InputField::YourRate => &self.your_rate,
            InputField::CompetitorRate => &self.competitor_rate,
            InputField::TradeAmount => &self.trade_amount,
            InputField::TradesPerYear => &self.trades_per_year,
            InputField::MarginPips => "",
        }
    }
}

/// Numeric comparison input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateComparisonInput {
    /// Your quoted rate, quote currency per unit
    pub your_rate: f64,
    /// Competitor's quoted rate
    pub competitor_rate: f64,
    /// Notional per trade, in quote currency
    pub trade_amount: f64,
    pub trades_per_year: u32,
    /// Margin added to your rate, in pips
    #[serde(default)]
    pub margin_pips: i32,
}

impl RateComparisonInput {
    pub fn new(your_rate: f64, competitor_rate: f64, trade_amount: f64, trades_per_year: u32) -> Self {
        Self {
            your_rate,
            competitor_rate,
            trade_amount,
            trades_per_year,
            margin_pips: 0,
        }
    }

    pub fn with_margin_pips(mut self, margin_pips: i32) -> Self {
        self.margin_pips = margin_pips;
        self
    }

    /// Numeric value of a field, as seen by the positivity guard
    pub fn value(&self, field: InputField) -> f64 {
        match field {
            InputField::YourRate => self.your_rate,
            InputField::CompetitorRate => self.competitor_rate,
            InputField::TradeAmount => self.trade_amount,
            InputField::TradesPerYear => f64::from(self.trades_per_year),
            InputField::MarginPips => f64::from(self.margin_pips),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_order() {
        let names: Vec<&str> = InputField::REQUIRED.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            vec!["your_rate", "competitor_rate", "trade_amount", "trades_per_year"]
        );
    }

    #[test]
    fn test_raw_text_lookup() {
        let raw = RawComparisonInput::new("1.3550", "1.3540", "500000", "52").with_margin_pips(10);
        assert_eq!(raw.text(InputField::CompetitorRate), "1.3540");
        assert_eq!(raw.text(InputField::TradesPerYear), "52");
        assert_eq!(raw.margin_pips, 10);
    }

    #[test]
    fn test_value_lookup() {
        let input = RateComparisonInput::new(1.355, 1.354, 500_000.0, 52);
        assert_eq!(input.value(InputField::TradesPerYear), 52.0);
        assert_eq!(input.value(InputField::MarginPips), 0.0);
    }
}
