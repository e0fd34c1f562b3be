//! Yahoo Finance market data provider.
//!
//! This provider uses the Yahoo Finance API to fetch:
//! - Daily closes for equities/ETFs (e.g., AAPL, VWCE.DE)
//! - Dividend histories
//! - Foreign exchange rates (e.g., EURUSD=X)

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{Dividend, Quote};
use crate::provider::MarketDataGateway;

const PROVIDER_ID: &str = "YAHOO";

/// Currency assumed when the chart metadata carries none.
const DEFAULT_CURRENCY: &str = "USD";

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::provider(
                PROVIDER_ID,
                format!("Failed to initialize Yahoo connector: {}", e),
            )
        })?;
        Ok(Self { connector })
    }

    /// Yahoo symbol of an FX pair: units of `quote` per one `base`.
    pub fn fx_symbol(base: &str, quote: &str) -> String {
        format!("{}{}=X", base, quote)
    }

    /// Midnight UTC of `date` as a `time::OffsetDateTime` for the Yahoo API.
    fn date_to_offset_datetime(date: NaiveDate) -> OffsetDateTime {
        let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        OffsetDateTime::from_unix_timestamp(timestamp)
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    fn map_error(symbol: &str, e: yahoo::YahooError) -> MarketDataError {
        if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
            MarketDataError::SymbolNotFound(symbol.to_string())
        } else {
            MarketDataError::provider(PROVIDER_ID, e.to_string())
        }
    }

    /// Session date of a daily bar at 00:00 UTC.
    ///
    /// Yahoo stamps daily bars with the session open, which for exchanges
    /// east of UTC (e.g. the ASX) falls on the previous UTC day. Shifting by
    /// the exchange's `gmtoffset` recovers the local trading date.
    fn session_timestamp(raw: i64, gmt_offset_secs: i64) -> Option<DateTime<Utc>> {
        let local = Utc.timestamp_opt(raw.checked_add(gmt_offset_secs)?, 0).single()?;
        Some(local.date_naive().and_time(NaiveTime::MIN).and_utc())
    }

    /// Convert a Yahoo quote to our Quote model.
    fn yahoo_quote_to_quote(
        yahoo_quote: &yahoo::Quote,
        currency: &str,
        gmt_offset_secs: i64,
    ) -> Result<Quote, MarketDataError> {
        let timestamp = Self::session_timestamp(yahoo_quote.timestamp as i64, gmt_offset_secs)
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        let close = Decimal::from_f64_retain(yahoo_quote.close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!(
                    "Failed to convert close price {} to Decimal",
                    yahoo_quote.close
                ),
            }
        })?;

        Ok(Quote::new(
            timestamp,
            close,
            currency.to_string(),
            PROVIDER_ID.to_string(),
        ))
    }

    fn yahoo_dividend_to_dividend(
        yahoo_dividend: &yahoo::Dividend,
    ) -> Result<Dividend, MarketDataError> {
        let date = Utc
            .timestamp_opt(yahoo_dividend.date as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid dividend timestamp: {}", yahoo_dividend.date),
            })?;
        let amount = Decimal::from_f64_retain(yahoo_dividend.amount).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!(
                    "Failed to convert dividend amount {} to Decimal",
                    yahoo_dividend.amount
                ),
            }
        })?;
        Ok(Dividend::new(date, amount))
    }
}

#[async_trait]
impl MarketDataGateway for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_close_series(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Quote>, MarketDataError> {
        debug!(
            "Fetching historical quotes for {} from {} to {} from Yahoo",
            ticker, start, end
        );

        // Yahoo treats the end bound as exclusive.
        let end_exclusive = end.succ_opt().unwrap_or(end);
        let response = self
            .connector
            .get_quote_history(
                ticker,
                Self::date_to_offset_datetime(start),
                Self::date_to_offset_datetime(end_exclusive),
            )
            .await
            .map_err(|e| Self::map_error(ticker, e))?;

        let metadata = response.metadata().ok();
        let currency = metadata
            .as_ref()
            .and_then(|m| m.currency.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let gmt_offset_secs = metadata.as_ref().map(|m| m.gmtoffset as i64).unwrap_or(0);

        match response.quotes() {
            Ok(yahoo_quotes) => {
                let mut quotes: Vec<Quote> = yahoo_quotes
                    .iter()
                    .filter_map(|q| match Self::yahoo_quote_to_quote(q, &currency, gmt_offset_secs) {
                        Ok(quote) => Some(quote),
                        Err(e) => {
                            warn!("Skipping quote due to conversion error: {:?}", e);
                            None
                        }
                    })
                    .collect();

                if quotes.is_empty() {
                    return Err(MarketDataError::NoDataForRange);
                }

                quotes.sort_by_key(|q| q.timestamp);
                Ok(quotes)
            }
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No historical quotes returned for '{}' between {} and {}",
                    ticker, start, end
                );
                Err(MarketDataError::NoDataForRange)
            }
            Err(e) => Err(MarketDataError::provider(PROVIDER_ID, e.to_string())),
        }
    }

    async fn get_dividends(&self, ticker: &str) -> Result<Vec<Dividend>, MarketDataError> {
        debug!("Fetching dividend history for {} from Yahoo", ticker);

        let response = self
            .connector
            .get_quote_range(ticker, "1d", "max")
            .await
            .map_err(|e| Self::map_error(ticker, e))?;

        // A chart without dividend events is a valid, empty history.
        let yahoo_dividends = match response.dividends() {
            Ok(dividends) => dividends,
            Err(e) => {
                debug!("No dividend events for {}: {}", ticker, e);
                return Ok(Vec::new());
            }
        };

        let mut dividends: Vec<Dividend> = yahoo_dividends
            .iter()
            .filter_map(|d| match Self::yahoo_dividend_to_dividend(d) {
                Ok(dividend) => Some(dividend),
                Err(e) => {
                    warn!("Skipping dividend due to conversion error: {:?}", e);
                    None
                }
            })
            .collect();
        dividends.sort_by_key(|d| d.date);
        Ok(dividends)
    }

    async fn get_fx_rate(&self, base: &str, quote: &str) -> Result<Decimal, MarketDataError> {
        let symbol = Self::fx_symbol(base, quote);
        debug!("Fetching FX rate {} from Yahoo", symbol);

        let response = self
            .connector
            .get_quote_range(&symbol, "1d", "5d")
            .await
            .map_err(|e| Self::map_error(&symbol, e))?;

        let last = response.last_quote().map_err(|e| {
            warn!("No FX quotes returned for {}: {}", symbol, e);
            MarketDataError::SymbolNotFound(symbol.clone())
        })?;

        Self::yahoo_quote_to_quote(&last, quote, 0).map(|q| q.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_symbol() {
        assert_eq!(YahooProvider::fx_symbol("EUR", "USD"), "EURUSD=X");
        assert_eq!(YahooProvider::fx_symbol("EUR", "GBP"), "EURGBP=X");
    }

    #[test]
    fn test_date_to_offset_datetime_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let odt = YahooProvider::date_to_offset_datetime(date);
        assert_eq!(odt.unix_timestamp(), 1_704_153_600);
    }

    #[test]
    fn test_yahoo_quote_conversion() {
        let yahoo_quote = yahoo::Quote {
            timestamp: 1_704_153_600,
            open: 100.0,
            high: 101.0,
            low: 99.0,
            volume: 1000,
            close: 100.5,
            adjclose: 100.5,
        };
        let quote = YahooProvider::yahoo_quote_to_quote(&yahoo_quote, "USD", 0).unwrap();
        assert_eq!(quote.close.to_string(), "100.5");
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.source, "YAHOO");
        assert_eq!(quote.day(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_nan_close_is_rejected() {
        let yahoo_quote = yahoo::Quote {
            timestamp: 1_704_153_600,
            open: f64::NAN,
            high: f64::NAN,
            low: f64::NAN,
            volume: 0,
            close: f64::NAN,
            adjclose: f64::NAN,
        };
        assert!(YahooProvider::yahoo_quote_to_quote(&yahoo_quote, "USD", 0).is_err());
    }

    #[test]
    fn test_session_day_uses_exchange_offset() {
        // ASX open during Australian daylight time: 2024-01-02 10:00 +11:00
        let open_utc = Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap().timestamp();
        let sydney = YahooProvider::session_timestamp(open_utc, 11 * 3600).unwrap();
        assert_eq!(sydney.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

        // New York open: 2024-01-02 09:30 -05:00 stays on the same day
        let open_utc = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap().timestamp();
        let new_york = YahooProvider::session_timestamp(open_utc, -5 * 3600).unwrap();
        assert_eq!(new_york, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }
}
