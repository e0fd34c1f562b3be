mod config;
mod output;

use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use realfolio_core::portfolio::{ReportService, ReportServiceTrait};
use realfolio_core::transactions::{TransactionRecord, TransactionService, TransactionServiceTrait};
use realfolio_core::utils::time_utils::{
    parse_timestamp, valuation_date_from_utc, valuation_date_today,
};
use realfolio_market_data::{CachedMarketDataGateway, EcbInflationProvider, YahooProvider};
use realfolio_storage_json::JsonTransactionRepository;

#[derive(Parser)]
#[command(name = "realfolio")]
#[command(about = "Inflation-adjusted portfolio valuation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Yearly nominal and real performance table
    Report {
        /// Valuation date (YYYY-MM-DD), today in the valuation timezone by default
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Per-ticker holdings with nominal and real gains
    Positions {
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// List stored purchases
    List,

    /// Record a purchase
    Add {
        #[arg(short, long)]
        ticker: String,

        #[arg(short, long)]
        shares: Decimal,

        /// Purchase instant (RFC 3339 or YYYY-MM-DD), now by default
        #[arg(short, long)]
        datetime: Option<String>,

        /// Price per share in EUR, looked up from market data when omitted
        #[arg(short, long)]
        price: Option<Decimal>,
    },

    /// Delete a purchase, identified by ticker, datetime and shares
    Delete {
        #[arg(short, long)]
        ticker: String,

        #[arg(short, long)]
        datetime: String,

        #[arg(short, long)]
        shares: Decimal,
    },
}

struct AppState {
    transactions: TransactionService,
    reports: ReportService,
    timezone: Tz,
}

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let timezone = config.settings.validate()?;
    tracing::debug!(
        "Transactions file in use: {}",
        config.transactions_file.display()
    );

    let repository = Arc::new(JsonTransactionRepository::new(&config.transactions_file));
    let yahoo = YahooProvider::new().context("failed to initialize the Yahoo Finance client")?;
    let market_data = Arc::new(CachedMarketDataGateway::new(
        Arc::new(yahoo),
        config.cache_ttl,
    ));
    let inflation_data = Arc::new(EcbInflationProvider::new());

    Ok(AppState {
        transactions: TransactionService::new(repository, timezone),
        reports: ReportService::new(market_data, inflation_data, config.settings.clone()),
        timezone,
    })
}

/// A looked-up price of zero means no market data; never store it silently.
fn require_market_price(ticker: &str, day: NaiveDate, suggested: Decimal) -> anyhow::Result<Decimal> {
    if suggested > Decimal::ZERO {
        return Ok(suggested);
    }
    anyhow::bail!(
        "no market price found for {} around {}; pass --price to record the purchase",
        ticker,
        day
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(&config.log_format);
    let state = build_state(&config)?;

    match cli.command {
        Commands::Report { today, json } => {
            let today = today.unwrap_or_else(|| valuation_date_today(state.timezone));
            let transactions = state.transactions.snapshot()?;
            let report = state.reports.build_report(&transactions, today).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_report(&report);
            }
        }
        Commands::Positions { today } => {
            let today = today.unwrap_or_else(|| valuation_date_today(state.timezone));
            let transactions = state.transactions.snapshot()?;
            let report = state.reports.build_report(&transactions, today).await?;
            output::print_positions(&report.positions);
            output::print_data_gaps(&report.data_gaps);
        }
        Commands::List => {
            output::print_transactions(&state.transactions.list()?);
        }
        Commands::Add {
            ticker,
            shares,
            datetime,
            price,
        } => {
            let timestamp = match datetime {
                Some(raw) => parse_timestamp(&raw)?,
                None => Utc::now(),
            };
            let ticker = ticker.trim().to_uppercase();
            let price_eur = match price {
                Some(price) => price,
                None => {
                    let day = valuation_date_from_utc(timestamp, state.timezone);
                    let suggested = state.reports.quote_price_eur(&ticker, day).await;
                    require_market_price(&ticker, day, suggested)?
                }
            };

            let record = TransactionRecord::new(ticker, shares, timestamp, price_eur);
            let added = state.transactions.add(record).await?;
            println!(
                "Added {} x {} at {} EUR on {}",
                added.shares,
                added.ticker,
                output::money(added.price_eur),
                added.trade_date
            );
        }
        Commands::Delete {
            ticker,
            datetime,
            shares,
        } => {
            let removed = state.transactions.delete(&ticker, &datetime, shares).await?;
            println!(
                "Deleted {} x {} bought {}",
                removed.shares, removed.ticker, removed.datetime
            );
        }
    }

    Ok(())
}
