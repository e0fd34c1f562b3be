//! In-memory TTL caching for market data.
//!
//! Historical closes and dividend histories rarely change within a session,
//! so repeated report runs are served from memory. Only successful fetches
//! are cached; failures always go back to the underlying gateway.
//!
//! Close series are keyed by `(ticker, start, end)`. The instrument currency
//! is implied by the ticker for a given provider, so it is not part of the key.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use moka::future::Cache;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{Dividend, Quote};
use crate::provider::MarketDataGateway;

/// Default time-to-live for cached entries (1 hour).
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Upper bound on cached close series; keys roll over daily with the range end
const MAX_CLOSE_SERIES: u64 = 1000;
const MAX_DIVIDEND_HISTORIES: u64 = 500;
const MAX_FX_RATES: u64 = 50;

type CloseKey = (String, NaiveDate, NaiveDate);

/// Caching decorator for any [`MarketDataGateway`].
pub struct CachedMarketDataGateway {
    inner: Arc<dyn MarketDataGateway>,
    closes: Cache<CloseKey, Vec<Quote>>,
    dividends: Cache<String, Vec<Dividend>>,
    fx_rates: Cache<(String, String), Decimal>,
}

impl CachedMarketDataGateway {
    pub fn new(inner: Arc<dyn MarketDataGateway>, ttl: Duration) -> Self {
        Self {
            inner,
            closes: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(MAX_CLOSE_SERIES)
                .support_invalidation_closures()
                .build(),
            dividends: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(MAX_DIVIDEND_HISTORIES)
                .build(),
            fx_rates: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(MAX_FX_RATES)
                .build(),
        }
    }

    pub fn with_default_ttl(inner: Arc<dyn MarketDataGateway>) -> Self {
        Self::new(inner, DEFAULT_TTL)
    }

    /// Drop all cached closes and dividends for `ticker`.
    pub async fn invalidate(&self, ticker: &str) {
        let owned = ticker.to_string();
        if let Err(e) = self
            .closes
            .invalidate_entries_if(move |(t, _, _), _| *t == owned)
        {
            warn!("Could not invalidate cached closes for {}: {}", ticker, e);
            self.closes.invalidate_all();
        }
        self.dividends.invalidate(ticker).await;
    }

    pub fn clear(&self) {
        self.closes.invalidate_all();
        self.dividends.invalidate_all();
        self.fx_rates.invalidate_all();
    }

    /// Entries currently held, after pending evictions are applied.
    pub async fn entry_count(&self) -> u64 {
        self.closes.run_pending_tasks().await;
        self.dividends.run_pending_tasks().await;
        self.fx_rates.run_pending_tasks().await;
        self.closes.entry_count() + self.dividends.entry_count() + self.fx_rates.entry_count()
    }
}

#[async_trait]
impl MarketDataGateway for CachedMarketDataGateway {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    async fn get_close_series(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Quote>, MarketDataError> {
        let key = (ticker.to_string(), start, end);
        if let Some(quotes) = self.closes.get(&key).await {
            debug!("Cache hit for closes {} [{}, {}]", ticker, start, end);
            return Ok(quotes);
        }
        let quotes = self.inner.get_close_series(ticker, start, end).await?;
        self.closes.insert(key, quotes.clone()).await;
        Ok(quotes)
    }

    async fn get_dividends(&self, ticker: &str) -> Result<Vec<Dividend>, MarketDataError> {
        let key = ticker.to_string();
        if let Some(dividends) = self.dividends.get(&key).await {
            debug!("Cache hit for dividends {}", ticker);
            return Ok(dividends);
        }
        let dividends = self.inner.get_dividends(ticker).await?;
        self.dividends.insert(key, dividends.clone()).await;
        Ok(dividends)
    }

    async fn get_fx_rate(&self, base: &str, quote: &str) -> Result<Decimal, MarketDataError> {
        let key = (base.to_string(), quote.to_string());
        if let Some(rate) = self.fx_rates.get(&key).await {
            return Ok(rate);
        }
        let rate = self.inner.get_fx_rate(base, quote).await?;
        self.fx_rates.insert(key, rate).await;
        Ok(rate)
    }
}
