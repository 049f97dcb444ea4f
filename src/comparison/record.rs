//! Comparison records for hand-off to a CRM
//!
//! Every completed comparison can be captured together with who it was
//! compared against and when. Records are logged as JSON; nothing is stored.

use super::engine::{compare, RateComparisonResult};
use super::input::RateComparisonInput;
use crate::error::Result;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub id: Uuid,
    pub comparison_date: NaiveDate,
    /// Your rate after margin, 4 decimals
    pub your_rate: String,
    pub competitor_rate: f64,
    pub competitor_name: Option<String>,
    pub trade_amount: f64,
    pub trades_per_year: u32,
    pub margin_pips: i32,
    pub results: RateComparisonResult,
}

impl ComparisonRecord {
    /// Run the comparison and capture it, dated today (UTC)
    pub fn capture(input: &RateComparisonInput, competitor_name: Option<&str>) -> Result<Self> {
        Self::capture_on(input, competitor_name, Utc::now().date_naive())
    }

    pub fn capture_on(
        input: &RateComparisonInput,
        competitor_name: Option<&str>,
        comparison_date: NaiveDate,
    ) -> Result<Self> {
        let results = compare(input)?;
        let effective = super::engine::effective_rate(input.your_rate, input.margin_pips);

        Ok(Self {
            id: Uuid::new_v4(),
            comparison_date,
            your_rate: crate::format::to_fixed(effective, 4),
            competitor_rate: input.competitor_rate,
            competitor_name: competitor_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from),
            trade_amount: input.trade_amount,
            trades_per_year: input.trades_per_year,
            margin_pips: input.margin_pips,
            results,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Emit the record on the `info` log level
    pub fn log(&self) -> Result<()> {
        let json = serde_json::to_string(self)?;
        log::info!("Comparison recorded: {}", json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> RateComparisonInput {
        RateComparisonInput::new(1.3550, 1.3540, 500_000.0, 52).with_margin_pips(10)
    }

    #[test]
    fn test_capture_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let record = ComparisonRecord::capture_on(&sample_input(), Some("  Acme FX "), date).unwrap();

        assert_eq!(record.comparison_date, date);
        assert_eq!(record.your_rate, "1.3560");
        assert_eq!(record.competitor_name.as_deref(), Some("Acme FX"));
        assert_eq!(record.margin_pips, 10);
        assert_eq!(record.results.pips_advantage, "20.0");
    }

    #[test]
    fn test_blank_competitor_name_dropped() {
        let record = ComparisonRecord::capture(&sample_input(), Some("   ")).unwrap();
        assert!(record.competitor_name.is_none());
    }

    #[test]
    fn test_ids_unique() {
        let a = ComparisonRecord::capture(&sample_input(), None).unwrap();
        let b = ComparisonRecord::capture(&sample_input(), None).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.results, b.results);
    }

    #[test]
    fn test_json_round_trip() {
        let record = ComparisonRecord::capture(&sample_input(), Some("Acme")).unwrap();
        let json = record.to_json().unwrap();
        assert!(json.contains("\"competitor_name\": \"Acme\""));
        let parsed: ComparisonRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.comparison_date, record.comparison_date);
        assert_eq!(parsed.results.annual_savings, record.results.annual_savings);
    }

    #[test]
    fn test_invalid_input_not_recorded() {
        let input = RateComparisonInput::new(0.0, 1.3, 1000.0, 1);
        assert!(ComparisonRecord::capture(&input, None).is_err());
    }
}
