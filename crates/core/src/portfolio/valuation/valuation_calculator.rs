use crate::portfolio::valuation::DailyValuationPoint;
use crate::series::DailySeries;
use crate::transactions::Transaction;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Expresses `amount` in money of the transaction day:
/// `amount / (current_index / transaction_index)`.
///
/// When either index is unknown (the transaction predates the index range)
/// the amount is returned unchanged. A zero index yields zero.
pub fn deflate(
    amount: Decimal,
    transaction_index: Option<Decimal>,
    current_index: Option<Decimal>,
) -> Decimal {
    match (transaction_index, current_index) {
        (Some(tx_idx), Some(cur_idx)) => cur_idx
            .checked_div(tx_idx)
            .and_then(|ratio| amount.checked_div(ratio))
            .unwrap_or(Decimal::ZERO),
        _ => amount,
    }
}

/// Computes the four daily series for every day of `[start, end]`.
///
/// Each day sums over every transaction traded on or before it:
/// - invested nominal: `price_eur * shares`
/// - invested real: the nominal cost deflated by the index ratio
/// - market nominal: `shares * price[ticker][day]`; tickers without a
///   resolved series, or without a value on the day, contribute nothing
/// - market real: the market value deflated the same way
pub fn calculate_daily_valuations(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
    inflation_index: &DailySeries,
    price_series: &HashMap<String, DailySeries>,
) -> Vec<DailyValuationPoint> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|t| t.trade_date);

    let points: Vec<DailyValuationPoint> = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            let current_index = inflation_index.get(day);
            let mut point = DailyValuationPoint::empty(day);

            for transaction in ordered.iter().take_while(|t| t.trade_date <= day) {
                let transaction_index = inflation_index.get(transaction.trade_date);

                let cost_nominal = transaction.cost();
                point.invested_nominal += cost_nominal;
                point.invested_real += deflate(cost_nominal, transaction_index, current_index);

                let Some(price) = price_series
                    .get(&transaction.ticker)
                    .and_then(|series| series.get(day))
                else {
                    continue;
                };
                let market_value = transaction.shares * price;
                point.market_nominal += market_value;
                point.market_real += deflate(market_value, transaction_index, current_index);
            }
            point
        })
        .collect();

    debug!(
        "Valued {} transactions over {} days",
        transactions.len(),
        points.len()
    );
    points
}
