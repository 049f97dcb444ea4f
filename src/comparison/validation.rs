//! Field-level validation of typed comparison input

use super::input::{InputField, RateComparisonInput, RawComparisonInput};
use serde::Serialize;
use std::fmt;

/// One violated field rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: InputField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: InputField) -> Self {
        Self {
            field,
            message: field.requirement_message().to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Every field rule violated by one input, in field order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.message.clone()).collect()
    }

    pub fn fields(&self) -> Vec<InputField> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub fn contains(&self, field: InputField) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.messages();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Parse a positive, finite decimal
fn parse_positive(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Parse a positive count from the leading digits, so `52.9` and `1e3`
/// read as 52 and 1. Counts above `u32::MAX` are rejected.
fn parse_count(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let digits = text
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text, |end| &text[..end]);
    let value: u32 = digits.parse().ok()?;
    (value >= 1).then_some(value)
}

/// Validate typed input.
///
/// Each required field is checked on its own, so the error list names
/// exactly the fields that are missing, non-numeric, zero or negative.
pub fn validate(raw: &RawComparisonInput) -> Result<RateComparisonInput, ValidationErrors> {
    let your_rate = parse_positive(&raw.your_rate);
    let competitor_rate = parse_positive(&raw.competitor_rate);
    let trade_amount = parse_positive(&raw.trade_amount);
    let trades_per_year = parse_count(&raw.trades_per_year);

    match (your_rate, competitor_rate, trade_amount, trades_per_year) {
        (Some(your_rate), Some(competitor_rate), Some(trade_amount), Some(trades_per_year)) => {
            Ok(RateComparisonInput {
                your_rate,
                competitor_rate,
                trade_amount,
                trades_per_year,
                margin_pips: raw.margin_pips,
            })
        }
        _ => {
            let present = [
                your_rate.is_some(),
                competitor_rate.is_some(),
                trade_amount.is_some(),
                trades_per_year.is_some(),
            ];
            let errors = InputField::REQUIRED
                .iter()
                .zip(present)
                .filter(|(_, ok)| !ok)
                .map(|(field, _)| FieldError::new(*field))
                .collect();
            Err(ValidationErrors(errors))
        }
    }
}

/// Flat form of [`validate`]: the error messages, empty when valid
pub fn validation_messages(raw: &RawComparisonInput) -> Vec<String> {
    match validate(raw) {
        Ok(_) => Vec::new(),
        Err(errors) => errors.messages(),
    }
}
