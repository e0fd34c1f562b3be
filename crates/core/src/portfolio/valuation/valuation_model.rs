//! Portfolio valuation domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio totals for one calendar day, all in EUR.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyValuationPoint {
    pub day: NaiveDate,
    pub invested_nominal: Decimal,
    pub market_nominal: Decimal,
    pub invested_real: Decimal,
    pub market_real: Decimal,
}

impl DailyValuationPoint {
    pub fn empty(day: NaiveDate) -> Self {
        Self {
            day,
            invested_nominal: Decimal::ZERO,
            market_nominal: Decimal::ZERO,
            invested_real: Decimal::ZERO,
            market_real: Decimal::ZERO,
        }
    }
}
