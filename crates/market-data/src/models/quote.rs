use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily close quote in the instrument's native currency
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Timestamp of the quote
    pub timestamp: DateTime<Utc>,

    /// Closing price
    pub close: Decimal,

    /// Quote currency
    pub currency: String,

    /// Source of the quote (YAHOO, MANUAL, ...)
    pub source: String,
}

impl Quote {
    pub fn new(timestamp: DateTime<Utc>, close: Decimal, currency: String, source: String) -> Self {
        Self {
            timestamp,
            close,
            currency,
            source,
        }
    }

    /// Calendar day the quote belongs to: the UTC date of `timestamp`.
    /// Providers stamp daily bars so this is the exchange's session date.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_new() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 15, 13, 30, 0).unwrap();
        let quote = Quote::new(
            timestamp,
            dec!(150.25),
            "USD".to_string(),
            "YAHOO".to_string(),
        );
        assert_eq!(quote.close, dec!(150.25));
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.day(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }
}
