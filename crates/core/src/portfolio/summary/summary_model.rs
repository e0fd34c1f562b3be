use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the yearly summary table. Amounts in EUR, percentages as
/// percent (2.5 means 2.5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummaryRow {
    pub year: i32,
    /// Year-end EUR price, only for single-ticker portfolios
    pub price_per_share: Option<Decimal>,
    pub capital_nominal: Decimal,
    pub capital_real: Decimal,
    pub return_pct: Decimal,
    pub gain_nominal: Decimal,
    pub annualized_gain_pct: Decimal,
    pub inflation_pct: Decimal,
    pub dividends_total: Decimal,
}
