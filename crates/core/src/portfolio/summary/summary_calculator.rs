use crate::portfolio::summary::YearlySummaryRow;
use crate::portfolio::valuation::DailyValuationPoint;

use chrono::Datelike;
use realfolio_market_data::AnnualRates;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// `(current / previous - 1) * 100`, or 0 when there is no usable prior.
fn pct_change(current: Decimal, previous: Option<Decimal>) -> Decimal {
    match previous {
        Some(prev) if !prev.is_zero() => (current / prev - Decimal::ONE) * Decimal::ONE_HUNDRED,
        _ => Decimal::ZERO,
    }
}

/// `(current - previous) / |previous| * 100`, or 0 when there is no usable prior.
fn abs_pct_diff(current: Decimal, previous: Option<Decimal>) -> Decimal {
    match previous {
        Some(prev) if !prev.is_zero() => (current - prev) / prev.abs() * Decimal::ONE_HUNDRED,
        _ => Decimal::ZERO,
    }
}

/// Resamples the daily series to one row per calendar year.
///
/// Capital is the year-end (last observed) market value. `price_per_share`
/// is passed only for single-ticker portfolios and maps year -> year-end EUR
/// price; years missing from it show 0.
pub fn aggregate_yearly(
    points: &[DailyValuationPoint],
    annual_rates: &AnnualRates,
    dividend_totals: &BTreeMap<i32, Decimal>,
    price_per_share: Option<&BTreeMap<i32, Decimal>>,
) -> Vec<YearlySummaryRow> {
    let mut year_ends: BTreeMap<i32, &DailyValuationPoint> = BTreeMap::new();
    for point in points {
        year_ends.insert(point.day.year(), point);
    }

    let mut rows = Vec::with_capacity(year_ends.len());
    let mut previous_capital: Option<Decimal> = None;
    let mut previous_gain: Option<Decimal> = None;

    for (year, point) in year_ends {
        let capital_nominal = point.market_nominal;
        let gain_nominal = capital_nominal - point.invested_nominal;

        rows.push(YearlySummaryRow {
            year,
            price_per_share: price_per_share
                .map(|prices| prices.get(&year).copied().unwrap_or(Decimal::ZERO)),
            capital_nominal,
            capital_real: point.market_real,
            return_pct: pct_change(capital_nominal, previous_capital),
            gain_nominal,
            annualized_gain_pct: abs_pct_diff(gain_nominal, previous_gain),
            inflation_pct: annual_rates
                .get(&year)
                .map(|rate| *rate * Decimal::ONE_HUNDRED)
                .unwrap_or(Decimal::ZERO),
            dividends_total: dividend_totals.get(&year).copied().unwrap_or(Decimal::ZERO),
        });

        previous_capital = Some(capital_nominal);
        previous_gain = Some(gain_nominal);
    }
    rows
}
