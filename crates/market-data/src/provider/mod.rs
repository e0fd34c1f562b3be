//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The gateway traits consumed by the valuation core
//! - The Yahoo Finance provider (closes, dividends, FX)
//! - The ECB provider (euro area HICP annual inflation)
//!
//! Gateways return native-currency data. Conversion to the base currency
//! and all fallback handling happen in the core, never in a provider.

mod traits;

pub mod ecb;
pub mod yahoo;

pub use traits::{InflationDataGateway, MarketDataGateway};
