//! Core error types for the Realfolio engine.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (file I/O, JSON) are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

pub use realfolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio application.
///
/// The valuation engine itself never returns these: missing market data
/// degrades to documented fallbacks. Errors surface only from ingestion,
/// the repository, and configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid transaction #{index} ({ticker}): {reason}")]
    InvalidTransaction {
        index: usize,
        ticker: String,
        reason: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transaction_message_names_record() {
        let err = Error::from(ValidationError::InvalidTransaction {
            index: 3,
            ticker: "AAPL".to_string(),
            reason: "shares must be positive".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Input validation failed: Invalid transaction #3 (AAPL): shares must be positive"
        );
    }

    #[test]
    fn test_market_data_error_converts() {
        let err: Error = MarketDataError::NoDataForRange.into();
        assert!(matches!(err, Error::MarketData(_)));
    }
}
