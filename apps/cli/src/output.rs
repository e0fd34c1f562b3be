//! Plain-text rendering of reports for the terminal.

use realfolio_core::constants::{BASE_CURRENCY, DISPLAY_DECIMAL_PRECISION};
use realfolio_core::portfolio::{DataGap, PortfolioReport, PositionSummary, YearlySummaryRow};
use realfolio_core::transactions::TransactionRecord;
use rust_decimal::Decimal;

pub fn money(value: Decimal) -> String {
    format!("{:.*}", DISPLAY_DECIMAL_PRECISION as usize, value.round_dp(DISPLAY_DECIMAL_PRECISION))
}

fn percent(value: Decimal) -> String {
    format!("{}%", money(value))
}

fn optional_money(value: Option<Decimal>) -> String {
    value.map(money).unwrap_or_else(|| "-".to_string())
}

pub fn print_report(report: &PortfolioReport) {
    if report.is_empty() {
        println!("No transactions recorded.");
        return;
    }

    println!(
        "Portfolio {} to {} ({})",
        report.start, report.end, BASE_CURRENCY
    );
    if let Some(latest) = report.latest() {
        println!(
            "Invested {} nominal / {} real, market value {} nominal / {} real",
            money(latest.invested_nominal),
            money(latest.invested_real),
            money(latest.market_nominal),
            money(latest.market_real)
        );
    }
    println!();
    print_summary(&report.summary);
    println!();
    print_positions(&report.positions);
    print_data_gaps(&report.data_gaps);
}

fn print_summary(rows: &[YearlySummaryRow]) {
    println!(
        "{:>6} {:>12} {:>14} {:>14} {:>9} {:>12} {:>10} {:>10} {:>11}",
        "Year", "Price", "Capital", "Capital real", "Return", "Gain", "Annual", "Inflation", "Dividends"
    );
    for row in rows {
        println!(
            "{:>6} {:>12} {:>14} {:>14} {:>9} {:>12} {:>10} {:>10} {:>11}",
            row.year,
            optional_money(row.price_per_share),
            money(row.capital_nominal),
            money(row.capital_real),
            percent(row.return_pct),
            money(row.gain_nominal),
            percent(row.annualized_gain_pct),
            percent(row.inflation_pct),
            money(row.dividends_total)
        );
    }
}

pub fn print_positions(positions: &[PositionSummary]) {
    if positions.is_empty() {
        println!("No positions.");
        return;
    }
    println!(
        "{:<10} {:>10} {:>12} {:>10} {:>12} {:>12} {:>12} {:>9} {:>12} {:>9}",
        "Ticker", "Shares", "Cost", "Avg", "Cost real", "Price", "Value", "Gain", "Gain real", "Real"
    );
    for p in positions {
        println!(
            "{:<10} {:>10} {:>12} {:>10} {:>12} {:>12} {:>12} {:>9} {:>12} {:>9}",
            p.ticker,
            p.total_shares.normalize(),
            money(p.cost_basis),
            money(p.average_price),
            money(p.cost_basis_real),
            optional_money(p.current_price),
            money(p.market_value),
            percent(p.gain_nominal_pct),
            money(p.gain_real),
            percent(p.gain_real_pct)
        );
    }
}

pub fn print_data_gaps(gaps: &[DataGap]) {
    if gaps.is_empty() {
        return;
    }
    println!();
    println!("Data gaps:");
    for gap in gaps {
        println!("  - {}", describe_gap(gap));
    }
}

fn describe_gap(gap: &DataGap) -> String {
    match gap {
        DataGap::InflationFallback { years, rate } => {
            let years: Vec<String> = years.iter().map(i32::to_string).collect();
            format!(
                "inflation for {} assumed at {}",
                years.join(", "),
                percent(*rate * Decimal::ONE_HUNDRED)
            )
        }
        DataGap::FxFallback { currency, rate } => {
            format!("{}/{} rate assumed at {}", BASE_CURRENCY, currency, rate)
        }
        DataGap::UnresolvedPrices { ticker, reason } => {
            format!("{} has no prices ({}), excluded from market value", ticker, reason)
        }
        DataGap::DividendsUnavailable { ticker, reason } => {
            format!("{} dividends unavailable ({})", ticker, reason)
        }
    }
}

pub fn print_transactions(records: &[TransactionRecord]) {
    if records.is_empty() {
        println!("No transactions recorded.");
        return;
    }
    println!("{:<10} {:>10} {:>12}  {}", "Ticker", "Shares", "Price EUR", "Datetime");
    for r in records {
        println!(
            "{:<10} {:>10} {:>12}  {}",
            r.ticker,
            r.shares.normalize(),
            money(r.price_eur),
            r.datetime
        );
    }
}
