//! Inflation domain models.

use realfolio_market_data::AnnualRates;
use serde::{Deserialize, Serialize};

use crate::series::DailySeries;

/// Daily cumulative inflation index plus the annual rates it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationData {
    /// Base 100 on the first day of the range
    pub index: DailySeries,
    /// Exactly one entry per calendar year of the range: the rate used
    pub annual_rates: AnnualRates,
    /// Years that fell back to the fixed rate
    pub fallback_years: Vec<i32>,
}

impl InflationData {
    pub fn used_fallback(&self) -> bool {
        !self.fallback_years.is_empty()
    }
}
