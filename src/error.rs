//! Error types for the spread checker

use crate::comparison::{InputField, ValidationErrors};
use thiserror::Error;

/// Main error type for the spread checker
#[derive(Error, Debug)]
pub enum SpreadError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid input: {field} must be a positive number, got {value}")]
    InvalidInput { field: InputField, value: f64 },

    #[error("Unknown currency pair: {0}")]
    UnknownPair(String),

    #[error("Unknown timeframe: {0}")]
    UnknownTimeframe(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl From<ValidationErrors> for SpreadError {
    fn from(errors: ValidationErrors) -> Self {
        SpreadError::Validation(errors)
    }
}

/// Result type alias for spread checker operations
pub type Result<T> = std::result::Result<T, SpreadError>;
