use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dividend paid per share, in the instrument's native currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    /// Ex-dividend timestamp as reported by the provider
    pub date: DateTime<Utc>,

    /// Amount per share
    pub amount: Decimal,
}

impl Dividend {
    pub fn new(date: DateTime<Utc>, amount: Decimal) -> Self {
        Self { date, amount }
    }

    pub fn ex_date(&self) -> NaiveDate {
        self.date.date_naive()
    }
}
