use super::*;
use chrono::NaiveDate;
use num_traits::ToPrimitive;
use realfolio_market_data::AnnualRates;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn assert_close(actual: Decimal, expected: f64, tolerance: f64) {
    let actual = actual.to_f64().unwrap();
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}

#[test]
fn test_daily_rate_compounds_to_annual() {
    let daily = daily_rate(dec!(0.02)).to_f64().unwrap();
    assert_close(
        Decimal::from_f64_retain((1.0 + daily).powi(365)).unwrap(),
        1.02,
        1e-9,
    );
    assert_eq!(daily_rate(Decimal::ZERO), Decimal::ZERO);
}

#[test]
fn test_daily_rate_degenerate_annual_rate() {
    assert_eq!(daily_rate(dec!(-1)), Decimal::ZERO);
    assert_eq!(daily_rate(dec!(-1.5)), Decimal::ZERO);
}

#[test]
fn test_index_starts_at_base_and_covers_range() {
    let rates: AnnualRates = [(2024, dec!(0.03))].into_iter().collect();
    let data = build_inflation_index(d(2024, 1, 1), d(2024, 12, 31), &rates, dec!(0.02));

    assert_eq!(data.index.len(), 366);
    assert_eq!(data.index.get(d(2024, 1, 1)), Some(dec!(100)));
    assert!(data.index.get(d(2024, 12, 31)).is_some());
    assert!(data.fallback_years.is_empty());
    assert_eq!(data.annual_rates.len(), 1);
    assert_eq!(data.annual_rates[&2024], dec!(0.03));
}

#[test]
fn test_zero_inflation_is_flat() {
    let rates: AnnualRates = [(2023, Decimal::ZERO), (2024, Decimal::ZERO)]
        .into_iter()
        .collect();
    let data = build_inflation_index(d(2023, 6, 1), d(2024, 6, 1), &rates, dec!(0.02));
    assert!(data.index.values().iter().all(|v| *v == dec!(100)));
}

#[test]
fn test_unavailable_source_matches_closed_form() {
    let data = build_inflation_index(
        d(2023, 1, 1),
        d(2024, 1, 1),
        &AnnualRates::new(),
        dec!(0.02),
    );

    assert_eq!(data.fallback_years, vec![2023, 2024]);
    assert_eq!(data.annual_rates[&2023], dec!(0.02));
    assert_eq!(data.annual_rates[&2024], dec!(0.02));
    assert!(data.used_fallback());

    // 364 compounding steps inside 2023, then one more on 2024-01-01
    assert_close(
        data.index.get(d(2023, 12, 31)).unwrap(),
        100.0 * 1.02_f64.powf(364.0 / 365.0),
        1e-6,
    );
    assert_close(data.index.last_value().unwrap(), 102.0, 1e-6);
}

#[test]
fn test_missing_year_falls_back_for_that_year_only() {
    let rates: AnnualRates = [(2023, dec!(0.05))].into_iter().collect();
    let data = build_inflation_index(d(2023, 12, 31), d(2024, 1, 2), &rates, dec!(0.02));

    assert_eq!(data.fallback_years, vec![2024]);
    assert_eq!(data.annual_rates[&2023], dec!(0.05));
    assert_eq!(data.annual_rates[&2024], dec!(0.02));

    let step = daily_rate(dec!(0.02));
    let expected = dec!(100) * (Decimal::ONE + step) * (Decimal::ONE + step);
    assert_eq!(data.index.last_value(), Some(expected));
}

#[test]
fn test_rates_outside_range_are_not_echoed() {
    let rates: AnnualRates = [(2019, dec!(0.01)), (2020, dec!(0.015)), (2021, dec!(0.05))]
        .into_iter()
        .collect();
    let data = build_inflation_index(d(2020, 3, 1), d(2020, 3, 31), &rates, dec!(0.02));
    assert_eq!(data.annual_rates.len(), 1);
    assert_eq!(data.annual_rates[&2020], dec!(0.015));
}

#[test]
fn test_end_before_start_is_clamped() {
    let data = build_inflation_index(
        d(2024, 5, 10),
        d(2024, 5, 1),
        &AnnualRates::new(),
        dec!(0.02),
    );
    assert_eq!(data.index.len(), 1);
    assert_eq!(data.index.get(d(2024, 5, 10)), Some(dec!(100)));
    assert_eq!(data.annual_rates.len(), 1);
}

#[test]
fn test_deflation_keeps_index_positive() {
    let rates: AnnualRates = [(2015, dec!(-0.005))].into_iter().collect();
    let data = build_inflation_index(d(2015, 1, 1), d(2015, 12, 31), &rates, dec!(0.02));
    assert!(data.index.values().iter().all(|v| *v > Decimal::ZERO));
    assert!(data.index.last_value().unwrap() < dec!(100));
}
