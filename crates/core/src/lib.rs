//! Realfolio Core - Valuation engine, services, and traits.
//!
//! This crate turns a list of purchase transactions, per-ticker price and
//! dividend histories, and annual inflation rates into daily nominal and
//! real portfolio values and a yearly summary table.
//!
//! It performs no I/O itself. Market data arrives through the gateway
//! traits of `realfolio-market-data`, and transactions through
//! [`transactions::TransactionRepositoryTrait`], implemented by the
//! `storage-json` crate.

pub mod constants;
pub mod errors;
pub mod inflation;
pub mod portfolio;
pub mod prices;
pub mod series;
pub mod settings;
pub mod transactions;
pub mod utils;

// Re-export common types
pub use portfolio::*;
pub use series::DailySeries;
pub use transactions::{Transaction, TransactionRecord};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
