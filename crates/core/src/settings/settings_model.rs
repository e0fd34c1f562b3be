use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_CURRENCY, DEFAULT_MARKET_CURRENCY, FALLBACK_FX_RATE, FALLBACK_INFLATION_RATE,
};
use crate::errors::{Error, Result};
use crate::utils::time_utils::{parse_timezone, DEFAULT_VALUATION_TZ};

/// Tunables of a valuation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationSettings {
    pub base_currency: String,
    /// Native currency assumed when a provider does not report one
    pub market_currency: String,
    pub fallback_inflation_rate: Decimal,
    /// Units of the market currency per one EUR when FX is unavailable
    pub fallback_fx_rate: Decimal,
    pub valuation_timezone: String,
}

impl Default for ValuationSettings {
    fn default() -> Self {
        Self {
            base_currency: BASE_CURRENCY.to_string(),
            market_currency: DEFAULT_MARKET_CURRENCY.to_string(),
            fallback_inflation_rate: FALLBACK_INFLATION_RATE,
            fallback_fx_rate: FALLBACK_FX_RATE,
            valuation_timezone: DEFAULT_VALUATION_TZ.name().to_string(),
        }
    }
}

impl ValuationSettings {
    /// Checks every value and returns the parsed timezone.
    pub fn validate(&self) -> Result<Tz> {
        if self.base_currency != BASE_CURRENCY {
            return Err(Error::InvalidConfigValue(format!(
                "base currency must be {}, got '{}'",
                BASE_CURRENCY, self.base_currency
            )));
        }
        if self.market_currency.trim().is_empty() {
            return Err(Error::InvalidConfigValue(
                "market currency must not be empty".to_string(),
            ));
        }
        if self.fallback_inflation_rate <= -Decimal::ONE {
            return Err(Error::InvalidConfigValue(format!(
                "fallback inflation rate must be greater than -1, got {}",
                self.fallback_inflation_rate
            )));
        }
        if self.fallback_fx_rate <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "fallback FX rate must be positive, got {}",
                self.fallback_fx_rate
            )));
        }
        self.timezone()
    }

    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.valuation_timezone).ok_or_else(|| {
            Error::InvalidConfigValue(format!(
                "unknown timezone '{}'",
                self.valuation_timezone
            ))
        })
    }
}
