//! Aligns sparse native-currency closes onto a dense EUR daily series.

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use realfolio_market_data::Quote;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::constants::MIN_FX_RATE;
use crate::series::DailySeries;

/// Converts a native-currency amount to EUR.
///
/// `fx_rate` is units of the native currency per one EUR and is floored at
/// [`MIN_FX_RATE`] so the division is always defined.
pub fn to_base_currency(native_amount: Decimal, fx_rate: Decimal) -> Decimal {
    native_amount / fx_rate.max(MIN_FX_RATE)
}

/// Resolves a ticker's EUR close for every day of `[start, end]`.
///
/// Each day carries the most recent close on or before it. Days before the
/// first known close are zero. Closes dated before `start` seed the
/// forward-fill, and when several closes share a day the latest timestamp
/// wins. Empty input yields an all-zero series.
pub fn resolve_price_series(
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
    quotes: &[Quote],
    fx_rate: Decimal,
) -> DailySeries {
    let mut closes_by_day: BTreeMap<NaiveDate, (DateTime<Utc>, Decimal)> = BTreeMap::new();
    for quote in quotes.iter().filter(|q| q.day() <= end) {
        let entry = closes_by_day
            .entry(quote.day())
            .or_insert((quote.timestamp, quote.close));
        if quote.timestamp >= entry.0 {
            *entry = (quote.timestamp, quote.close);
        }
    }

    let mut last_close = closes_by_day
        .range(..start)
        .next_back()
        .map(|(_, (_, close))| *close);

    let series = DailySeries::filled(start, end, Decimal::ZERO);
    let values = series
        .iter()
        .map(|(day, _)| {
            if let Some((_, close)) = closes_by_day.get(&day) {
                last_close = Some(*close);
            }
            last_close
                .map(|close| to_base_currency(close, fx_rate))
                .unwrap_or(Decimal::ZERO)
        })
        .collect();

    debug!(
        "Resolved {} closes for {} onto {} days",
        closes_by_day.len(),
        ticker,
        series.len()
    );

    DailySeries::new(start, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn quote(y: i32, m: u32, day: u32, hour: u32, close: Decimal) -> Quote {
        Quote::new(
            Utc.with_ymd_and_hms(y, m, day, hour, 0, 0).unwrap(),
            close,
            "USD".to_string(),
            "TEST".to_string(),
        )
    }

    #[test]
    fn test_to_base_currency() {
        assert_eq!(to_base_currency(dec!(110), dec!(1.1)), dec!(100));
        assert_eq!(to_base_currency(dec!(50), Decimal::ONE), dec!(50));
        // Non-positive rates are floored instead of dividing by zero
        assert_eq!(to_base_currency(dec!(1), Decimal::ZERO), dec!(1000000000));
    }

    #[test]
    fn test_empty_quotes_yield_all_zero() {
        let series = resolve_price_series("X", d(2024, 1, 1), d(2024, 1, 10), &[], dec!(1.1));
        assert_eq!(series.len(), 10);
        assert!(series.values().iter().all(|v| v.is_zero()));
    }

    #[test]
    fn test_forward_fill_and_zero_before_first_quote() {
        let quotes = vec![
            quote(2024, 1, 3, 21, dec!(110)),
            quote(2024, 1, 5, 21, dec!(121)),
        ];
        let series =
            resolve_price_series("X", d(2024, 1, 1), d(2024, 1, 7), &quotes, dec!(1.1));

        assert_eq!(series.get(d(2024, 1, 1)), Some(Decimal::ZERO));
        assert_eq!(series.get(d(2024, 1, 2)), Some(Decimal::ZERO));
        assert_eq!(series.get(d(2024, 1, 3)), Some(dec!(100)));
        assert_eq!(series.get(d(2024, 1, 4)), Some(dec!(100)));
        assert_eq!(series.get(d(2024, 1, 5)), Some(dec!(110)));
        assert_eq!(series.get(d(2024, 1, 7)), Some(dec!(110)));
    }

    #[test]
    fn test_quote_before_start_seeds_fill() {
        let quotes = vec![
            quote(2023, 12, 28, 21, dec!(10)),
            quote(2023, 12, 29, 21, dec!(20)),
        ];
        let series = resolve_price_series("X", d(2024, 1, 1), d(2024, 1, 3), &quotes, Decimal::ONE);
        assert!(series.values().iter().all(|v| *v == dec!(20)));
    }

    #[test]
    fn test_latest_timestamp_wins_within_day() {
        // Unordered input on purpose
        let quotes = vec![
            quote(2024, 1, 2, 20, dec!(12)),
            quote(2024, 1, 2, 9, dec!(11)),
        ];
        let series = resolve_price_series("X", d(2024, 1, 1), d(2024, 1, 2), &quotes, Decimal::ONE);
        assert_eq!(series.get(d(2024, 1, 2)), Some(dec!(12)));
    }

    #[test]
    fn test_quotes_after_end_are_ignored() {
        let quotes = vec![quote(2024, 2, 1, 21, dec!(99))];
        let series = resolve_price_series("X", d(2024, 1, 1), d(2024, 1, 31), &quotes, Decimal::ONE);
        assert!(series.values().iter().all(|v| v.is_zero()));
    }
}
