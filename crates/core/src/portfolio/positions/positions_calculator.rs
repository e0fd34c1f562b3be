use crate::inflation::daily_rate;
use crate::portfolio::positions::PositionSummary;
use crate::transactions::Transaction;

use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use std::collections::{BTreeMap, HashMap};

/// `gain / base * 100`, or 0 when the base is not positive.
fn gain_pct(gain: Decimal, base: Decimal) -> Decimal {
    if base > Decimal::ZERO {
        gain / base * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Nominal cost carried forward to `today` at the fixed daily rate.
fn inflated_cost(transaction: &Transaction, today: NaiveDate, daily: Decimal) -> Decimal {
    let cost = transaction.cost();
    let days = (today - transaction.trade_date).num_days().max(0);
    (Decimal::ONE + daily)
        .checked_powi(days)
        .and_then(|factor| cost.checked_mul(factor))
        .unwrap_or(cost)
}

/// Builds one holdings card per ticker, sorted by ticker.
///
/// `current_prices` holds EUR prices; a missing or non-positive price means
/// "market data unavailable": the market value equals the cost basis and
/// all gains are zero.
pub fn summarize_positions(
    transactions: &[Transaction],
    current_prices: &HashMap<String, Decimal>,
    today: NaiveDate,
    fallback_inflation_rate: Decimal,
) -> Vec<PositionSummary> {
    let daily = daily_rate(fallback_inflation_rate);

    let mut by_ticker: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for transaction in transactions {
        by_ticker
            .entry(transaction.ticker.as_str())
            .or_default()
            .push(transaction);
    }

    by_ticker
        .into_iter()
        .map(|(ticker, lots)| {
            let total_shares: Decimal = lots.iter().map(|t| t.shares).sum();
            let cost_basis: Decimal = lots.iter().map(|t| t.cost()).sum();
            let cost_basis_real: Decimal =
                lots.iter().map(|t| inflated_cost(t, today, daily)).sum();
            let average_price = if total_shares.is_zero() {
                Decimal::ZERO
            } else {
                cost_basis / total_shares
            };

            let current_price = current_prices
                .get(ticker)
                .copied()
                .filter(|price| *price > Decimal::ZERO);

            match current_price {
                Some(price) => {
                    let market_value = price * total_shares;
                    let gain_nominal = market_value - cost_basis;
                    let gain_real = market_value - cost_basis_real;
                    PositionSummary {
                        ticker: ticker.to_string(),
                        total_shares,
                        cost_basis,
                        average_price,
                        cost_basis_real,
                        current_price: Some(price),
                        market_value,
                        gain_nominal,
                        gain_nominal_pct: gain_pct(gain_nominal, cost_basis),
                        gain_real,
                        gain_real_pct: gain_pct(gain_real, cost_basis_real),
                    }
                }
                None => PositionSummary {
                    ticker: ticker.to_string(),
                    total_shares,
                    cost_basis,
                    average_price,
                    cost_basis_real,
                    current_price: None,
                    market_value: cost_basis,
                    gain_nominal: Decimal::ZERO,
                    gain_nominal_pct: Decimal::ZERO,
                    gain_real: Decimal::ZERO,
                    gain_real_pct: Decimal::ZERO,
                },
            }
        })
        .collect()
}
