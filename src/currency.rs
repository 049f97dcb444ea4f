//! Currencies, currency pairs and the quoted pair table

use crate::error::{Result, SpreadError};
use crate::types::Rate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pair selected when nothing else is configured
pub const DEFAULT_PAIR: &str = "GBPUSD";

/// ISO 4217 currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// British Pound Sterling
    GBP,
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
    /// Australian Dollar
    AUD,
    /// Canadian Dollar
    CAD,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::GBP => "GBP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::GBP => "£",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::JPY => "¥",
            Currency::CHF => "CHF",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
        }
    }

    /// Parse from ISO code, case-insensitive
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "GBP" => Some(Currency::GBP),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "JPY" => Some(Currency::JPY),
            "CHF" => Some(Currency::CHF),
            "AUD" => Some(Currency::AUD),
            "CAD" => Some(Currency::CAD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Base/quote currency pair. A rate on the pair is quote units per base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Compact symbol used as the cache and config key, e.g. `GBPUSD`
    pub fn symbol(&self) -> String {
        format!("{}{}", self.base.code(), self.quote.code())
    }
}

impl FromStr for CurrencyPair {
    type Err = SpreadError;

    /// Accepts `GBPUSD` or `GBP/USD`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (base, quote) = match s.split_once('/') {
            Some(parts) => parts,
            None if s.len() == 6 && s.is_ascii() => s.split_at(3),
            None => return Err(SpreadError::UnknownPair(s.to_string())),
        };

        match (Currency::from_code(base), Currency::from_code(quote)) {
            (Some(base), Some(quote)) if base != quote => Ok(Self::new(base, quote)),
            _ => Err(SpreadError::UnknownPair(s.to_string())),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// A quoted pair with the reference rate the demo series and ticker start from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FxPair {
    pub pair: CurrencyPair,
    pub base_rate: Rate,
}

impl FxPair {
    pub fn new(pair: CurrencyPair, base_rate: Rate) -> Self {
        Self { pair, base_rate }
    }

    pub fn symbol(&self) -> String {
        self.pair.symbol()
    }

    /// Display label, e.g. `GBP/USD`
    pub fn label(&self) -> String {
        self.pair.to_string()
    }
}

/// Built-in pair table
pub fn default_pairs() -> Vec<FxPair> {
    vec![
        FxPair::new(CurrencyPair::new(Currency::GBP, Currency::USD), 1.3550),
        FxPair::new(CurrencyPair::new(Currency::GBP, Currency::EUR), 1.1685),
        FxPair::new(CurrencyPair::new(Currency::EUR, Currency::USD), 1.0825),
    ]
}
