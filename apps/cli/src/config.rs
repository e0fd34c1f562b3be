use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use realfolio_core::settings::ValuationSettings;
use realfolio_market_data::cache::DEFAULT_TTL;
use rust_decimal::Decimal;

const DEFAULT_TRANSACTIONS_FILE: &str = "transactions.json";

/// Runtime configuration, read from `RF_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub transactions_file: PathBuf,
    pub log_format: String,
    pub cache_ttl: Duration,
    pub settings: ValuationSettings,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let vars: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with("RF_"))
            .collect();
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> anyhow::Result<Self> {
        let defaults = ValuationSettings::default();
        let settings = ValuationSettings {
            market_currency: var(vars, "RF_MARKET_CURRENCY")
                .map(str::to_uppercase)
                .unwrap_or(defaults.market_currency),
            fallback_inflation_rate: decimal_var(
                vars,
                "RF_FALLBACK_INFLATION_RATE",
                defaults.fallback_inflation_rate,
            )?,
            fallback_fx_rate: decimal_var(vars, "RF_FALLBACK_FX_RATE", defaults.fallback_fx_rate)?,
            valuation_timezone: var(vars, "RF_TIMEZONE")
                .map(str::to_string)
                .unwrap_or(defaults.valuation_timezone),
            base_currency: defaults.base_currency,
        };
        settings.validate()?;

        let cache_ttl = match var(vars, "RF_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().with_context(|| {
                format!("RF_CACHE_TTL_SECS must be a number of seconds, got '{}'", raw)
            })?),
            None => DEFAULT_TTL,
        };

        Ok(Self {
            transactions_file: PathBuf::from(
                var(vars, "RF_TRANSACTIONS_FILE").unwrap_or(DEFAULT_TRANSACTIONS_FILE),
            ),
            log_format: var(vars, "RF_LOG_FORMAT").unwrap_or("text").to_string(),
            cache_ttl,
            settings,
        })
    }
}

fn var<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn decimal_var(
    vars: &HashMap<String, String>,
    key: &str,
    default: Decimal,
) -> anyhow::Result<Decimal> {
    match var(vars, key) {
        Some(raw) => Decimal::from_str(raw)
            .map_err(|e| anyhow!("{} is not a decimal ('{}'): {}", key, raw, e)),
        None => Ok(default),
    }
}
