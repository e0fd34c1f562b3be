use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use num_traits::{FromPrimitive, ToPrimitive};
use realfolio_market_data::AnnualRates;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::constants::{DAYS_PER_YEAR, INFLATION_INDEX_BASE};
use crate::inflation::InflationData;
use crate::series::DailySeries;
use crate::utils::time_utils::years_between;

/// Converts an annual rate into the equivalent compounded daily rate:
/// `(1 + annual)^(1/365) - 1`.
///
/// Rates at or below -100% have no real root and yield 0.
pub fn daily_rate(annual_rate: Decimal) -> Decimal {
    let base = match (Decimal::ONE + annual_rate).to_f64() {
        Some(b) if b > 0.0 => b,
        _ => {
            warn!(
                "Annual inflation rate {} has no daily equivalent, using 0",
                annual_rate
            );
            return Decimal::ZERO;
        }
    };
    Decimal::from_f64(base.powf(1.0 / DAYS_PER_YEAR) - 1.0).unwrap_or(Decimal::ZERO)
}

/// Builds the daily inflation index over `[start, end]`.
///
/// The index is 100 on `start` and each later day multiplies the previous
/// value by `1 + daily_rate(year(day))`. Years missing from `rates` (or all
/// years when `rates` is empty) use `fallback_rate`. An `end` before `start`
/// is clamped to a one-day range.
pub fn build_inflation_index(
    start: NaiveDate,
    end: NaiveDate,
    rates: &AnnualRates,
    fallback_rate: Decimal,
) -> InflationData {
    let end = end.max(start);

    let mut annual_rates = AnnualRates::new();
    let mut fallback_years = Vec::new();
    for year in years_between(start, end) {
        let rate = match rates.get(&year) {
            Some(rate) => *rate,
            None => {
                fallback_years.push(year);
                fallback_rate
            }
        };
        annual_rates.insert(year, rate);
    }
    if !fallback_years.is_empty() {
        warn!(
            "Using fallback inflation rate {} for years {:?}",
            fallback_rate, fallback_years
        );
    }

    let daily_rates: HashMap<i32, Decimal> = annual_rates
        .iter()
        .map(|(year, rate)| (*year, daily_rate(*rate)))
        .collect();

    let day_count = (end - start).num_days() as usize + 1;
    let mut values = Vec::with_capacity(day_count);
    let mut current = INFLATION_INDEX_BASE;
    values.push(current);
    for day in start.iter_days().skip(1).take(day_count - 1) {
        let rate = daily_rates.get(&day.year()).copied().unwrap_or(Decimal::ZERO);
        current *= Decimal::ONE + rate;
        values.push(current);
    }

    debug!(
        "Built inflation index from {} to {} ({} days), final value {}",
        start, end, day_count, current
    );

    InflationData {
        index: DailySeries::new(start, values),
        annual_rates,
        fallback_years,
    }
}
