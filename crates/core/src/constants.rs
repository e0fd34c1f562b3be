use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Currency every valuation is expressed in
pub const BASE_CURRENCY: &str = "EUR";

/// Native currency assumed when a provider does not report one
pub const DEFAULT_MARKET_CURRENCY: &str = "USD";

/// Annual inflation rate used when the inflation source is unavailable
pub const FALLBACK_INFLATION_RATE: Decimal = dec!(0.02);

/// EUR -> native rate used when the FX source is unavailable
pub const FALLBACK_FX_RATE: Decimal = dec!(1.1);

/// Floor applied to FX rates before dividing by them
pub const MIN_FX_RATE: Decimal = dec!(0.000000001);

/// Inflation index value on the first day of a range
pub const INFLATION_INDEX_BASE: Decimal = dec!(100);

/// Days used to turn an annual rate into a daily one
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Window (days either side) searched when suggesting a purchase price
pub const PRICE_SUGGESTION_WINDOW_DAYS: i64 = 3;

/// Look-back used when no close exists inside the suggestion window
pub const PRICE_SUGGESTION_LOOKBACK_DAYS: i64 = 5;
