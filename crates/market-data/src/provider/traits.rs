//! Gateway trait definitions.
//!
//! The valuation core depends only on these traits so that tests can
//! substitute fixtures for the network-backed providers.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::{AnnualRates, Dividend, Quote};

/// Read access to prices, dividends and FX rates.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use realfolio_market_data::provider::MarketDataGateway;
///
/// struct FixtureGateway;
///
/// #[async_trait]
/// impl MarketDataGateway for FixtureGateway {
///     fn id(&self) -> &'static str {
///         "FIXTURE"
///     }
///
///     // ... implement the fetch methods
/// }
/// ```
#[async_trait]
pub trait MarketDataGateway: Send + Sync {
    /// Unique identifier for this gateway ("YAHOO", "CACHE", ...).
    ///
    /// Used for logging only.
    fn id(&self) -> &'static str;

    /// Fetch daily closes for `ticker` covering `[start, end]` (both inclusive).
    ///
    /// Quotes are returned in ascending timestamp order in the instrument's
    /// native currency. An instrument with no observations in the range may
    /// return either `Ok(vec![])` or `Err(MarketDataError::NoDataForRange)`.
    async fn get_close_series(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Quote>, MarketDataError>;

    /// Fetch the full dividend history of `ticker`, ordered by ex-date.
    async fn get_dividends(&self, ticker: &str) -> Result<Vec<Dividend>, MarketDataError>;

    /// Fetch the latest `base -> quote` FX rate (units of `quote` per one `base`).
    async fn get_fx_rate(&self, base: &str, quote: &str) -> Result<Decimal, MarketDataError>;
}

/// Read access to annual inflation rates.
#[async_trait]
pub trait InflationDataGateway: Send + Sync {
    fn id(&self) -> &'static str;

    /// Fetch annual rates (fractions) for every year in `[start_year, end_year]`
    /// the source has data for. Missing years are simply absent.
    async fn get_annual_rates(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> Result<AnnualRates, MarketDataError>;
}
