use chrono::NaiveDate;
use realfolio_market_data::AnnualRates;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::income::DividendTable;
use crate::portfolio::positions::PositionSummary;
use crate::portfolio::summary::YearlySummaryRow;
use crate::portfolio::valuation::DailyValuationPoint;

/// An input that could not be fetched and was replaced by a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DataGap {
    /// Years valued with the fixed inflation rate
    #[serde(rename_all = "camelCase")]
    InflationFallback { years: Vec<i32>, rate: Decimal },
    /// EUR -> currency rate replaced by the configured flat rate
    #[serde(rename_all = "camelCase")]
    FxFallback { currency: String, rate: Decimal },
    /// Ticker has no usable close series; it is excluded from market values
    #[serde(rename_all = "camelCase")]
    UnresolvedPrices { ticker: String, reason: String },
    /// Ticker's dividend history is treated as empty
    #[serde(rename_all = "camelCase")]
    DividendsUnavailable { ticker: String, reason: String },
}

/// Everything a valuation run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub daily: Vec<DailyValuationPoint>,
    pub annual_rates: AnnualRates,
    pub dividends: DividendTable,
    pub summary: Vec<YearlySummaryRow>,
    pub positions: Vec<PositionSummary>,
    pub data_gaps: Vec<DataGap>,
}

impl PortfolioReport {
    /// Report of a portfolio with no transactions.
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today,
            daily: Vec::new(),
            annual_rates: AnnualRates::new(),
            dividends: DividendTable::new(),
            summary: Vec::new(),
            positions: Vec::new(),
            data_gaps: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }

    pub fn latest(&self) -> Option<&DailyValuationPoint> {
        self.daily.last()
    }
}
