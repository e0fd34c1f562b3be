use super::*;
use crate::portfolio::valuation::DailyValuationPoint;
use chrono::NaiveDate;
use realfolio_market_data::AnnualRates;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn point(y: i32, m: u32, day: u32, invested: Decimal, market: Decimal) -> DailyValuationPoint {
    DailyValuationPoint {
        day: NaiveDate::from_ymd_opt(y, m, day).unwrap(),
        invested_nominal: invested,
        market_nominal: market,
        invested_real: invested,
        market_real: market / dec!(2),
    }
}

#[test]
fn test_single_day_single_row() {
    let points = vec![point(2024, 5, 1, dec!(100), dec!(100))];
    let rows = aggregate_yearly(&points, &AnnualRates::new(), &BTreeMap::new(), None);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].year, 2024);
    assert_eq!(rows[0].return_pct, Decimal::ZERO);
    assert_eq!(rows[0].annualized_gain_pct, Decimal::ZERO);
    assert_eq!(rows[0].price_per_share, None);
}

#[test]
fn test_year_end_values_and_returns() {
    let points = vec![
        point(2022, 6, 1, dec!(1000), dec!(900)),
        point(2022, 12, 31, dec!(1000), dec!(1000)), // year-end 2022
        point(2023, 7, 1, dec!(1000), dec!(5000)),
        point(2023, 12, 31, dec!(1000), dec!(1200)), // year-end 2023
        point(2024, 3, 1, dec!(2000), dec!(2100)),   // partial final year
    ];
    let rates: AnnualRates = [(2022, dec!(0.084)), (2023, dec!(0.054)), (2024, dec!(0.024))]
        .into_iter()
        .collect();
    let dividends = BTreeMap::from([(2023, dec!(12.5))]);

    let rows = aggregate_yearly(&points, &rates, &dividends, None);
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].capital_nominal, dec!(1000));
    assert_eq!(rows[0].capital_real, dec!(500));
    assert_eq!(rows[0].gain_nominal, Decimal::ZERO);
    assert_eq!(rows[0].return_pct, Decimal::ZERO);
    assert_eq!(rows[0].inflation_pct, dec!(8.4));
    assert_eq!(rows[0].dividends_total, Decimal::ZERO);

    assert_eq!(rows[1].return_pct, dec!(20));
    assert_eq!(rows[1].gain_nominal, dec!(200));
    // Prior gain is zero
    assert_eq!(rows[1].annualized_gain_pct, Decimal::ZERO);
    assert_eq!(rows[1].dividends_total, dec!(12.5));

    assert_eq!(rows[2].return_pct, dec!(75));
    assert_eq!(rows[2].gain_nominal, dec!(100));
    assert_eq!(rows[2].annualized_gain_pct, dec!(-50));
    assert_eq!(rows[2].inflation_pct, dec!(2.4));
}

#[test]
fn test_annualized_gain_uses_absolute_prior() {
    let points = vec![
        point(2022, 12, 31, dec!(1000), dec!(800)), // gain -200
        point(2023, 12, 31, dec!(1000), dec!(900)), // gain -100
    ];
    let rows = aggregate_yearly(&points, &AnnualRates::new(), &BTreeMap::new(), None);
    assert_eq!(rows[1].annualized_gain_pct, dec!(50));
    assert_eq!(rows[1].return_pct, dec!(12.5));
}

#[test]
fn test_zero_prior_capital_gives_zero_return() {
    let points = vec![
        point(2022, 12, 31, dec!(100), Decimal::ZERO),
        point(2023, 12, 31, dec!(100), dec!(150)),
    ];
    let rows = aggregate_yearly(&points, &AnnualRates::new(), &BTreeMap::new(), None);
    assert_eq!(rows[1].return_pct, Decimal::ZERO);
    assert_eq!(rows[1].annualized_gain_pct, dec!(150));
}

#[test]
fn test_price_per_share_for_single_ticker() {
    let points = vec![
        point(2022, 12, 31, dec!(100), dec!(100)),
        point(2023, 12, 31, dec!(100), dec!(100)),
    ];
    let prices = BTreeMap::from([(2023, dec!(42))]);
    let rows = aggregate_yearly(&points, &AnnualRates::new(), &BTreeMap::new(), Some(&prices));
    assert_eq!(rows[0].price_per_share, Some(Decimal::ZERO));
    assert_eq!(rows[1].price_per_share, Some(dec!(42)));
}
