//! Configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! default_pair = "GBPUSD"
//! history_days = 90
//! seed = 42
//!
//! [[pairs]]
//! symbol = "GBPUSD"
//! base_rate = 1.3550
//! ```

use crate::currency::{default_pairs, CurrencyPair, FxPair, DEFAULT_PAIR};
use crate::data::series::{
    RandomWalk, DEFAULT_BAND, DEFAULT_HISTORY_DAYS, DEFAULT_VOLATILITY, MAX_HISTORY_DAYS,
};
use crate::error::{Result, SpreadError};
use crate::live::{DEFAULT_MAX_FLUCTUATION, DEFAULT_TICK_INTERVAL_SECS, MAX_TICK_INTERVAL_SECS};
use chrono::Duration;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairConfig {
    pub symbol: String,
    pub base_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_pair_symbol")]
    pub default_pair: String,
    #[serde(default = "default_pair_configs")]
    pub pairs: Vec<PairConfig>,
    #[serde(default = "default_history_days")]
    pub history_days: u32,
    #[serde(default = "default_volatility")]
    pub volatility: f64,
    #[serde(default = "default_band")]
    pub band: f64,
    #[serde(default = "default_ticker_interval_secs")]
    pub ticker_interval_secs: i64,
    #[serde(default = "default_ticker_max_fluctuation")]
    pub ticker_max_fluctuation: f64,
    /// Fixed seed for reproducible history; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_pair_symbol() -> String {
    DEFAULT_PAIR.to_string()
}

fn default_pair_configs() -> Vec<PairConfig> {
    default_pairs()
        .into_iter()
        .map(|p| PairConfig {
            symbol: p.symbol(),
            base_rate: p.base_rate,
        })
        .collect()
}

fn default_history_days() -> u32 {
    DEFAULT_HISTORY_DAYS
}

fn default_volatility() -> f64 {
    DEFAULT_VOLATILITY
}

fn default_band() -> f64 {
    DEFAULT_BAND
}

fn default_ticker_interval_secs() -> i64 {
    DEFAULT_TICK_INTERVAL_SECS
}

fn default_ticker_max_fluctuation() -> f64 {
    DEFAULT_MAX_FLUCTUATION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_pair: default_pair_symbol(),
            pairs: default_pair_configs(),
            history_days: default_history_days(),
            volatility: default_volatility(),
            band: default_band(),
            ticker_interval_secs: default_ticker_interval_secs(),
            ticker_max_fluctuation: default_ticker_max_fluctuation(),
            seed: None,
        }
    }
}

impl Config {
    /// Parse and validate TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.volatility > 0.0 && self.volatility < 1.0) {
            return Err(SpreadError::ConfigError(format!(
                "volatility must be in (0, 1), got {}",
                self.volatility
            )));
        }
        if !(self.band > 0.0 && self.band < 1.0) {
            return Err(SpreadError::ConfigError(format!(
                "band must be in (0, 1), got {}",
                self.band
            )));
        }
        if self.history_days > MAX_HISTORY_DAYS {
            return Err(SpreadError::ConfigError(format!(
                "history_days must be at most {}, got {}",
                MAX_HISTORY_DAYS, self.history_days
            )));
        }
        self.ticker_interval()?;
        if !(self.ticker_max_fluctuation >= 0.0 && self.ticker_max_fluctuation.is_finite()) {
            return Err(SpreadError::ConfigError(format!(
                "ticker_max_fluctuation must be non-negative, got {}",
                self.ticker_max_fluctuation
            )));
        }
        if self.pairs.is_empty() {
            return Err(SpreadError::ConfigError("no pairs configured".to_string()));
        }

        let pairs = self.fx_pairs()?;
        let mut seen = HashSet::new();
        for pair in &pairs {
            if !seen.insert(pair.symbol()) {
                return Err(SpreadError::ConfigError(format!(
                    "duplicate pair {}",
                    pair.symbol()
                )));
            }
        }
        self.pair(&self.default_pair).map_err(|_| {
            SpreadError::ConfigError(format!(
                "default pair {} is not in the pair table",
                self.default_pair
            ))
        })?;
        Ok(())
    }

    /// Configured pairs as [`FxPair`]s
    pub fn fx_pairs(&self) -> Result<Vec<FxPair>> {
        self.pairs
            .iter()
            .map(|p| {
                let pair: CurrencyPair = p.symbol.parse()?;
                if !(p.base_rate.is_finite() && p.base_rate > 0.0) {
                    return Err(SpreadError::ConfigError(format!(
                        "base rate for {} must be positive, got {}",
                        p.symbol, p.base_rate
                    )));
                }
                Ok(FxPair::new(pair, p.base_rate))
            })
            .collect()
    }

    /// Look up a configured pair by `GBPUSD` or `GBP/USD`
    pub fn pair(&self, symbol: &str) -> Result<FxPair> {
        let wanted: CurrencyPair = symbol.parse()?;
        self.fx_pairs()?
            .into_iter()
            .find(|p| p.pair == wanted)
            .ok_or_else(|| SpreadError::UnknownPair(symbol.to_string()))
    }

    pub fn walk(&self) -> Result<RandomWalk> {
        RandomWalk::new(self.volatility, self.band)
    }

    /// Ticker interval, between one second and one day
    pub fn ticker_interval(&self) -> Result<Duration> {
        if !(1..=MAX_TICK_INTERVAL_SECS).contains(&self.ticker_interval_secs) {
            return Err(SpreadError::ConfigError(format!(
                "ticker_interval_secs must be in 1..={}, got {}",
                MAX_TICK_INTERVAL_SECS, self.ticker_interval_secs
            )));
        }
        Ok(Duration::seconds(self.ticker_interval_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_pair, "GBPUSD");
        assert_eq!(config.history_days, 90);
        assert_eq!(config.fx_pairs().unwrap().len(), 3);
        assert_eq!(config.ticker_interval().unwrap(), Duration::seconds(5));
    }

    #[test]
    fn test_unvalidated_interval_is_an_error() {
        let config = Config {
            ticker_interval_secs: i64::MAX,
            ..Config::default()
        };
        assert!(matches!(config.ticker_interval(), Err(SpreadError::ConfigError(_))));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            default_pair = "EUR/USD"
            history_days = 30
            seed = 7

            [[pairs]]
            symbol = "EURUSD"
            base_rate = 1.09
            "#,
        )
        .unwrap();

        assert_eq!(config.history_days, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.pair("EURUSD").unwrap().base_rate, 1.09);
        assert!(matches!(config.pair("GBPUSD"), Err(SpreadError::UnknownPair(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Config::from_toml_str("volatility = 0.0"),
            Err(SpreadError::ConfigError(_))
        ));
        assert!(Config::from_toml_str("band = 1.5").is_err());
        assert!(Config::from_toml_str("ticker_interval_secs = 0").is_err());
        assert!(matches!(
            Config::from_toml_str("ticker_interval_secs = 9223372036854775807"),
            Err(SpreadError::ConfigError(_))
        ));
        assert!(Config::from_toml_str("ticker_interval_secs = 86401").is_err());
        assert!(Config::from_toml_str("ticker_interval_secs = 86400").is_ok());
        assert!(matches!(
            Config::from_toml_str("history_days = 4294967295"),
            Err(SpreadError::ConfigError(_))
        ));
        assert!(Config::from_toml_str("history_days = 3650").is_ok());
        assert!(Config::from_toml_str("default_pair = \"USDJPY\"").is_err());
        assert!(Config::from_toml_str(
            "[[pairs]]\nsymbol = \"GBPUSD\"\nbase_rate = -1.0\n"
        )
        .is_err());
        assert!(Config::from_toml_str(
            "[[pairs]]\nsymbol = \"GBPUSD\"\nbase_rate = 1.3\n[[pairs]]\nsymbol = \"GBP/USD\"\nbase_rate = 1.4\n"
        )
        .is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            Config::from_toml_str("history_days = \"ninety\""),
            Err(SpreadError::TomlError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "history_days = 5").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.history_days, 5);

        assert!(matches!(
            Config::load(Path::new("/nonexistent/spread-checker.toml")),
            Err(SpreadError::IoError(_))
        ));
    }
}
