//! Market data models
//!
//! - `quote` - Daily close quotes (Quote)
//! - `dividend` - Dividend events (Dividend)
//! - [`AnnualRates`] - Annual inflation rates keyed by calendar year

mod dividend;
mod quote;

use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub use dividend::Dividend;
pub use quote::Quote;

/// Calendar year -> annual rate as a fraction (0.02 = 2%)
pub type AnnualRates = BTreeMap<i32, Decimal>;
