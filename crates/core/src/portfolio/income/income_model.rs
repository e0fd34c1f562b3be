use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A dividend per share, already converted to EUR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendEvent {
    pub ticker: String,
    pub ex_date: NaiveDate,
    pub amount_per_share_eur: Decimal,
}

/// ticker -> (year -> EUR dividend income)
pub type DividendTable = BTreeMap<String, BTreeMap<i32, Decimal>>;
