use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate};
use futures::future::join_all;
use log::{debug, info, warn};
use realfolio_market_data::{
    AnnualRates, Dividend, InflationDataGateway, MarketDataError, MarketDataGateway, Quote,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::report_model::{DataGap, PortfolioReport};
use super::report_traits::ReportServiceTrait;
use crate::constants::{PRICE_SUGGESTION_LOOKBACK_DAYS, PRICE_SUGGESTION_WINDOW_DAYS};
use crate::errors::{Error, Result, ValidationError};
use crate::inflation::{build_inflation_index, InflationData};
use crate::portfolio::income::{
    attribute_dividends, convert_dividends, yearly_dividend_totals, DividendEvent,
};
use crate::portfolio::positions::summarize_positions;
use crate::portfolio::summary::aggregate_yearly;
use crate::portfolio::valuation::calculate_daily_valuations;
use crate::prices::{resolve_price_series, to_base_currency};
use crate::series::DailySeries;
use crate::settings::ValuationSettings;
use crate::transactions::{distinct_tickers, Transaction};
use crate::utils::time_utils::valuation_date_today;

/// Orchestrates a valuation run: fetch, fall back, compute.
pub struct ReportService {
    market_data: Arc<dyn MarketDataGateway>,
    inflation_data: Arc<dyn InflationDataGateway>,
    settings: ValuationSettings,
}

impl ReportService {
    pub fn new(
        market_data: Arc<dyn MarketDataGateway>,
        inflation_data: Arc<dyn InflationDataGateway>,
        settings: ValuationSettings,
    ) -> Self {
        Self {
            market_data,
            inflation_data,
            settings,
        }
    }

    /// Annual rates for the range, or the fallback for every year.
    async fn load_inflation(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        gaps: &mut Vec<DataGap>,
    ) -> InflationData {
        let rates = match self
            .inflation_data
            .get_annual_rates(start.year(), end.year())
            .await
        {
            Ok(rates) if !rates.is_empty() => rates,
            Ok(_) => {
                warn!(
                    "Inflation source {} returned no rates for {}-{}",
                    self.inflation_data.id(),
                    start.year(),
                    end.year()
                );
                AnnualRates::new()
            }
            Err(e) => {
                warn!(
                    "Inflation source {} unavailable: {}",
                    self.inflation_data.id(),
                    e
                );
                AnnualRates::new()
            }
        };

        let data = build_inflation_index(start, end, &rates, self.settings.fallback_inflation_rate);
        if data.used_fallback() {
            gaps.push(DataGap::InflationFallback {
                years: data.fallback_years.clone(),
                rate: self.settings.fallback_inflation_rate,
            });
        }
        data
    }

    /// EUR -> `currency` rate, memoized per run in `rates`.
    async fn fx_rate(
        &self,
        currency: &str,
        rates: &mut HashMap<String, Decimal>,
        gaps: &mut Vec<DataGap>,
    ) -> Decimal {
        let currency = currency.to_uppercase();
        if currency == self.settings.base_currency {
            return Decimal::ONE;
        }
        if let Some(rate) = rates.get(&currency) {
            return *rate;
        }

        let rate = match self
            .market_data
            .get_fx_rate(&self.settings.base_currency, &currency)
            .await
        {
            Ok(rate) if rate > Decimal::ZERO => rate,
            Ok(rate) => {
                warn!(
                    "Ignoring non-positive FX rate {} for {}/{}, using fallback {}",
                    rate, self.settings.base_currency, currency, self.settings.fallback_fx_rate
                );
                self.fx_fallback(&currency, gaps)
            }
            Err(e) => {
                warn!(
                    "FX rate {}/{} unavailable ({}), using fallback {}",
                    self.settings.base_currency, currency, e, self.settings.fallback_fx_rate
                );
                self.fx_fallback(&currency, gaps)
            }
        };
        rates.insert(currency, rate);
        rate
    }

    fn fx_fallback(&self, currency: &str, gaps: &mut Vec<DataGap>) -> Decimal {
        gaps.push(DataGap::FxFallback {
            currency: currency.to_string(),
            rate: self.settings.fallback_fx_rate,
        });
        self.settings.fallback_fx_rate
    }

    /// Native currency of a close series, or the configured market currency.
    fn quote_currency(&self, quotes: &[Quote]) -> String {
        quotes
            .first()
            .map(|q| q.currency.clone())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.settings.market_currency.clone())
    }

    fn describe(e: &MarketDataError) -> String {
        if e.is_missing_data() {
            format!("no data: {}", e)
        } else {
            e.to_string()
        }
    }

    async fn fetch_all(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> (
        Vec<std::result::Result<Vec<Quote>, MarketDataError>>,
        Vec<std::result::Result<Vec<Dividend>, MarketDataError>>,
    ) {
        let close_fetches = tickers
            .iter()
            .map(|ticker| self.market_data.get_close_series(ticker, start, end));
        let dividend_fetches = tickers
            .iter()
            .map(|ticker| self.market_data.get_dividends(ticker));
        futures::join!(join_all(close_fetches), join_all(dividend_fetches))
    }

    async fn last_close(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Option<Quote> {
        match self.market_data.get_close_series(ticker, start, end).await {
            Ok(quotes) => quotes.into_iter().max_by_key(|q| q.timestamp),
            Err(e) => {
                debug!("No closes for {} in [{}, {}]: {}", ticker, start, end, e);
                None
            }
        }
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    async fn build_report(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Result<PortfolioReport> {
        let Some(start) = transactions.iter().map(|t| t.trade_date).min() else {
            debug!("No transactions, returning empty report");
            return Ok(PortfolioReport::empty(today));
        };
        if today < start {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "valuation date {} is before the first transaction on {}",
                today, start
            ))));
        }
        let end = today;
        let tickers = distinct_tickers(transactions);
        info!(
            "Building report for {} transactions in {} tickers from {} to {}",
            transactions.len(),
            tickers.len(),
            start,
            end
        );

        let mut gaps = Vec::new();
        let inflation = self.load_inflation(start, end, &mut gaps).await;
        let (closes, dividends) = self.fetch_all(&tickers, start, end).await;

        let mut fx_rates: HashMap<String, Decimal> = HashMap::new();
        let mut price_series: HashMap<String, DailySeries> = HashMap::new();
        let mut dividend_events: HashMap<String, Vec<DividendEvent>> = HashMap::new();

        for ((ticker, closes), dividends) in tickers.iter().zip(closes).zip(dividends) {
            let currency = match &closes {
                Ok(quotes) => self.quote_currency(quotes),
                Err(_) => self.settings.market_currency.clone(),
            };
            let fx_rate = self.fx_rate(&currency, &mut fx_rates, &mut gaps).await;

            match closes {
                Ok(quotes) => {
                    if quotes.is_empty() {
                        warn!("No closes for {}, valuing at zero", ticker);
                        gaps.push(DataGap::UnresolvedPrices {
                            ticker: ticker.clone(),
                            reason: "no quotes returned".to_string(),
                        });
                    }
                    let series = resolve_price_series(ticker, start, end, &quotes, fx_rate);
                    price_series.insert(ticker.clone(), series);
                }
                Err(e) => {
                    warn!("Price series for {} unavailable: {}", ticker, e);
                    gaps.push(DataGap::UnresolvedPrices {
                        ticker: ticker.clone(),
                        reason: Self::describe(&e),
                    });
                }
            }

            match dividends {
                Ok(history) => {
                    dividend_events.insert(ticker.clone(), convert_dividends(ticker, &history, fx_rate));
                }
                Err(e) => {
                    warn!("Dividend history for {} unavailable: {}", ticker, e);
                    gaps.push(DataGap::DividendsUnavailable {
                        ticker: ticker.clone(),
                        reason: Self::describe(&e),
                    });
                }
            }
        }

        let daily =
            calculate_daily_valuations(transactions, start, end, &inflation.index, &price_series);
        let dividend_table = attribute_dividends(&dividend_events, transactions, start, end);
        let dividend_totals = yearly_dividend_totals(&dividend_table);

        let single_ticker_prices: Option<BTreeMap<i32, Decimal>> = match tickers.as_slice() {
            [only] => Some(
                price_series
                    .get(only)
                    .map(|series| series.year_end_values())
                    .unwrap_or_default(),
            ),
            _ => None,
        };
        let summary = aggregate_yearly(
            &daily,
            &inflation.annual_rates,
            &dividend_totals,
            single_ticker_prices.as_ref(),
        );

        let current_prices: HashMap<String, Decimal> = price_series
            .iter()
            .filter_map(|(ticker, series)| series.last_value().map(|v| (ticker.clone(), v)))
            .collect();
        let positions = summarize_positions(
            transactions,
            &current_prices,
            end,
            self.settings.fallback_inflation_rate,
        );

        if !gaps.is_empty() {
            info!("Report built with {} data gaps", gaps.len());
        }

        Ok(PortfolioReport {
            start,
            end,
            daily,
            annual_rates: inflation.annual_rates,
            dividends: dividend_table,
            summary,
            positions,
            data_gaps: gaps,
        })
    }

    async fn quote_price_eur(&self, ticker: &str, day: NaiveDate) -> Decimal {
        let ticker = ticker.trim().to_uppercase();
        let ticker = ticker.as_str();
        let window = Duration::days(PRICE_SUGGESTION_WINDOW_DAYS);
        let mut quote = self.last_close(ticker, day - window, day + window).await;

        if quote.is_none() {
            let today = self
                .settings
                .timezone()
                .map(valuation_date_today)
                .unwrap_or(day);
            let lookback = Duration::days(PRICE_SUGGESTION_LOOKBACK_DAYS);
            quote = self.last_close(ticker, today - lookback, today).await;
        }

        let Some(quote) = quote else {
            warn!("No recent close for {} around {}", ticker, day);
            return Decimal::ZERO;
        };

        let mut rates = HashMap::new();
        let mut gaps = Vec::new();
        let fx_rate = self
            .fx_rate(&self.quote_currency(std::slice::from_ref(&quote)), &mut rates, &mut gaps)
            .await;
        for gap in &gaps {
            warn!("Suggested price for {} uses a fallback: {:?}", ticker, gap);
        }
        to_base_currency(quote.close, fx_rate)
    }
}
