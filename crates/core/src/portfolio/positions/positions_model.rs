use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Holdings card for one ticker. Amounts in EUR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    pub ticker: String,
    pub total_shares: Decimal,
    pub cost_basis: Decimal,
    pub average_price: Decimal,
    /// Cost compounded forward at the fixed annual inflation rate
    pub cost_basis_real: Decimal,
    /// `None` when no market price is known
    pub current_price: Option<Decimal>,
    pub market_value: Decimal,
    pub gain_nominal: Decimal,
    pub gain_nominal_pct: Decimal,
    pub gain_real: Decimal,
    pub gain_real_pct: Decimal,
}

impl PositionSummary {
    pub fn has_market_price(&self) -> bool {
        self.current_price.is_some()
    }
}
