//! Purchase transaction models and ingestion.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::time_utils::{parse_timestamp, valuation_date_from_utc};

/// A purchase as it is stored on disk.
///
/// Field names and the float encoding of numbers match the transactions
/// file format, so existing files load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub ticker: String,
    pub shares: Decimal,
    /// ISO-8601 / RFC 3339 instant, normally UTC
    pub datetime: String,
    pub price_eur: Decimal,
}

impl TransactionRecord {
    pub fn new(
        ticker: impl Into<String>,
        shares: Decimal,
        timestamp: DateTime<Utc>,
        price_eur: Decimal,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            shares,
            datetime: timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            price_eur,
        }
    }

    /// Whether this record is the one identified by `ticker`, `timestamp`
    /// and `shares`. Ticker comparison ignores case; timestamps compare as
    /// instants when the stored value parses, textually otherwise.
    pub fn matches(&self, ticker: &str, timestamp: &str, shares: Decimal) -> bool {
        if !self.ticker.trim().eq_ignore_ascii_case(ticker.trim()) || self.shares != shares {
            return false;
        }
        match (parse_timestamp(&self.datetime), parse_timestamp(timestamp)) {
            (Ok(stored), Ok(wanted)) => stored == wanted,
            _ => self.datetime.trim() == timestamp.trim(),
        }
    }
}

/// A validated purchase, immutable once a valuation run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Upper-case ticker symbol
    pub ticker: String,
    /// Always positive
    pub shares: Decimal,
    pub timestamp: DateTime<Utc>,
    /// `timestamp` normalized to a calendar day in the valuation timezone
    pub trade_date: NaiveDate,
    /// Purchase price per share in EUR, never negative
    pub price_eur: Decimal,
}

impl Transaction {
    /// Validates a stored record. `index` is the record's position in the
    /// file and is only used to name it in errors.
    pub fn from_record(
        index: usize,
        record: &TransactionRecord,
        tz: Tz,
    ) -> Result<Self, ValidationError> {
        let ticker = record.ticker.trim().to_uppercase();
        let invalid = |reason: String| ValidationError::InvalidTransaction {
            index,
            ticker: if ticker.is_empty() {
                "<empty>".to_string()
            } else {
                ticker.clone()
            },
            reason,
        };

        if ticker.is_empty() {
            return Err(invalid("ticker must not be empty".to_string()));
        }
        if record.shares <= Decimal::ZERO {
            return Err(invalid(format!(
                "shares must be positive, got {}",
                record.shares
            )));
        }
        if record.price_eur < Decimal::ZERO {
            return Err(invalid(format!(
                "price must not be negative, got {}",
                record.price_eur
            )));
        }
        let timestamp = parse_timestamp(&record.datetime)
            .map_err(|e| invalid(format!("invalid datetime '{}': {}", record.datetime, e)))?;

        Ok(Self {
            ticker: ticker.clone(),
            shares: record.shares,
            timestamp,
            trade_date: valuation_date_from_utc(timestamp, tz),
            price_eur: record.price_eur,
        })
    }

    /// Nominal cost of the purchase in EUR.
    pub fn cost(&self) -> Decimal {
        self.price_eur * self.shares
    }
}

/// Validates every stored record, failing on the first offending one.
pub fn ingest(records: &[TransactionRecord], tz: Tz) -> Result<Vec<Transaction>, ValidationError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| Transaction::from_record(index, record, tz))
        .collect()
}

/// Distinct tickers of a snapshot, sorted.
pub fn distinct_tickers(transactions: &[Transaction]) -> Vec<String> {
    let mut tickers: Vec<String> = transactions.iter().map(|t| t.ticker.clone()).collect();
    tickers.sort();
    tickers.dedup();
    tickers
}
