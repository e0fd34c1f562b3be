//! Realfolio Market Data Crate
//!
//! This crate provides the external data collaborators of the valuation
//! engine: historical close prices, dividend histories, FX rates and
//! annual inflation rates.
//!
//! # Architecture
//!
//! ```text
//! +------------------+      +-------------------------+
//! |  realfolio-core  | ---> |  MarketDataGateway      |  (closes, dividends, FX)
//! |  report service  | ---> |  InflationDataGateway   |  (annual CPI rates)
//! +------------------+      +-------------------------+
//!                                 |            |
//!                                 v            v
//!                      +----------------+  +--------------------+
//!                      | CachedMarket-  |  | EcbInflation-      |
//!                      | DataGateway    |  | Provider           |
//!                      +----------------+  +--------------------+
//!                                 |
//!                                 v
//!                      +----------------+
//!                      | YahooProvider  |
//!                      +----------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - A daily close in the instrument's native currency
//! - [`Dividend`] - A dividend event in the instrument's native currency
//! - [`MarketDataGateway`] / [`InflationDataGateway`] - Read interfaces consumed by the core
//! - [`CachedMarketDataGateway`] - TTL cache in front of any market data gateway

pub mod cache;
pub mod errors;
pub mod models;
pub mod provider;

pub use cache::CachedMarketDataGateway;
pub use errors::MarketDataError;
pub use models::{AnnualRates, Dividend, Quote};
pub use provider::ecb::EcbInflationProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::{InflationDataGateway, MarketDataGateway};
