use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::report_model::PortfolioReport;
use crate::transactions::Transaction;
use crate::Result;

/// Trait defining the contract for valuation runs.
#[async_trait]
pub trait ReportServiceTrait: Send + Sync {
    /// Fetches every external series once and runs the valuation engine
    /// over `[first trade date, today]`.
    async fn build_report(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Result<PortfolioReport>;

    /// Suggested EUR purchase price of `ticker` on `day`, 0 when unknown.
    async fn quote_price_eur(&self, ticker: &str, day: NaiveDate) -> Decimal;
}
