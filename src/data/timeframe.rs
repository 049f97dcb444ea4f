//! Chart timeframes

use crate::error::{Result, SpreadError};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trailing window shown on the historical chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "5D")]
    FiveDays,
    #[default]
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
}

impl Timeframe {
    pub fn days(&self) -> u32 {
        match self {
            Timeframe::OneDay => 1,
            Timeframe::FiveDays => 5,
            Timeframe::OneMonth => 30,
            Timeframe::ThreeMonths => 90,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::days(i64::from(self.days()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneDay => "1D",
            Timeframe::FiveDays => "5D",
            Timeframe::OneMonth => "1M",
            Timeframe::ThreeMonths => "3M",
        }
    }

    /// Every timeframe, shortest first
    pub fn all() -> [Timeframe; 4] {
        [
            Timeframe::OneDay,
            Timeframe::FiveDays,
            Timeframe::OneMonth,
            Timeframe::ThreeMonths,
        ]
    }
}

impl FromStr for Timeframe {
    type Err = SpreadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "1D" => Ok(Timeframe::OneDay),
            "5D" | "1W" => Ok(Timeframe::FiveDays),
            "1M" => Ok(Timeframe::OneMonth),
            "3M" => Ok(Timeframe::ThreeMonths),
            _ => Err(SpreadError::UnknownTimeframe(s.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
