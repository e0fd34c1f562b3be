use crate::portfolio::income::{DividendEvent, DividendTable};
use crate::prices::to_base_currency;
use crate::transactions::Transaction;

use crate::utils::time_utils::years_between;

use chrono::{Datelike, NaiveDate};
use log::debug;
use realfolio_market_data::Dividend;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Converts a native-currency dividend history to EUR events using the FX
/// rate in effect at query time.
pub fn convert_dividends(ticker: &str, dividends: &[Dividend], fx_rate: Decimal) -> Vec<DividendEvent> {
    dividends
        .iter()
        .map(|dividend| DividendEvent {
            ticker: ticker.to_string(),
            ex_date: dividend.ex_date(),
            amount_per_share_eur: to_base_currency(dividend.amount, fx_rate),
        })
        .collect()
}

/// Attributes dividend income to each ticker and year.
///
/// Every ticker held in `transactions` gets an entry for every calendar
/// year of `[start, end]`, zero when it paid nothing. For each event the
/// income is the amount per share times the shares bought on or before the
/// ex-date. Events with an ex-date outside `[start, end]` are ignored.
pub fn attribute_dividends(
    events: &HashMap<String, Vec<DividendEvent>>,
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> DividendTable {
    let years = years_between(start, end);
    let mut table = DividendTable::new();
    for transaction in transactions {
        table.entry(transaction.ticker.clone()).or_insert_with(|| {
            years
                .iter()
                .map(|year| (*year, Decimal::ZERO))
                .collect::<BTreeMap<i32, Decimal>>()
        });
    }

    for (ticker, by_year) in table.iter_mut() {
        let Some(ticker_events) = events.get(ticker) else {
            continue;
        };
        let in_range = ticker_events
            .iter()
            .filter(|event| event.ex_date >= start && event.ex_date <= end);
        for event in in_range {
            let Some(income) = by_year.get_mut(&event.ex_date.year()) else {
                continue;
            };
            let shares_held: Decimal = transactions
                .iter()
                .filter(|t| &t.ticker == ticker && t.trade_date <= event.ex_date)
                .map(|t| t.shares)
                .sum();
            *income += shares_held * event.amount_per_share_eur;
        }
        debug!("Attributed {} dividend events for {}", ticker_events.len(), ticker);
    }
    table
}

/// Sum across tickers per year.
pub fn yearly_dividend_totals(table: &DividendTable) -> BTreeMap<i32, Decimal> {
    let mut totals = BTreeMap::new();
    for by_year in table.values() {
        for (year, amount) in by_year {
            *totals.entry(*year).or_insert(Decimal::ZERO) += *amount;
        }
    }
    totals
}
