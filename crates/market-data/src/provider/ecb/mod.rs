//! European Central Bank inflation provider.
//!
//! Fetches the monthly euro area HICP annual rate of change
//! (`ICP.M.U2.N.000000.4.ANR`) from the ECB data portal as CSV and reduces
//! it to one rate per calendar year: the mean of the monthly observations,
//! expressed as a fraction.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::AnnualRates;
use crate::provider::InflationDataGateway;

const PROVIDER_ID: &str = "ECB";

const BASE_URL: &str = "https://data-api.ecb.europa.eu/service/data";

/// Monthly HICP, overall index, annual rate of change, euro area.
pub const HICP_SERIES_KEY: &str = "ICP/M.U2.N.000000.4.ANR";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One row of the ECB `csvdata` response. Other columns are ignored.
#[derive(Debug, Deserialize)]
struct HicpRow {
    #[serde(rename = "TIME_PERIOD")]
    time_period: String,
    #[serde(rename = "OBS_VALUE")]
    obs_value: Option<String>,
}

/// ECB data portal provider for annual inflation rates.
///
/// # Example
///
/// ```ignore
/// use realfolio_market_data::EcbInflationProvider;
///
/// let provider = EcbInflationProvider::new();
/// let rates = provider.get_annual_rates(2020, 2024).await?;
/// ```
pub struct EcbInflationProvider {
    client: Client,
    base_url: String,
}

impl Default for EcbInflationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EcbInflationProvider {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Point the provider at a different data portal (mirrors, test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn series_url(&self, start_year: i32, end_year: i32) -> String {
        format!(
            "{}/{}?startPeriod={}-01&endPeriod={}-12&format=csvdata",
            self.base_url.trim_end_matches('/'),
            HICP_SERIES_KEY,
            start_year,
            end_year
        )
    }
}

/// Parse an ECB `csvdata` body into yearly mean rates (fractions).
///
/// Rows with an empty or unparseable observation are skipped. Periods are
/// expected as `YYYY-MM`; only the year part is used.
pub fn parse_hicp_csv(body: &str) -> Result<AnnualRates, MarketDataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut buckets: BTreeMap<i32, (Decimal, u32)> = BTreeMap::new();
    for row in reader.deserialize::<HicpRow>() {
        let row = row?;
        let Some(year) = row
            .time_period
            .split('-')
            .next()
            .and_then(|y| y.parse::<i32>().ok())
        else {
            warn!("Skipping HICP row with period '{}'", row.time_period);
            continue;
        };
        let Some(value) = row
            .obs_value
            .as_deref()
            .filter(|v| !v.is_empty())
            .and_then(|v| Decimal::from_str(v).ok())
        else {
            continue;
        };
        let entry = buckets.entry(year).or_insert((Decimal::ZERO, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|(year, (sum, count))| {
            let mean = sum / Decimal::from(count);
            (year, mean / Decimal::ONE_HUNDRED)
        })
        .collect())
}

#[async_trait]
impl InflationDataGateway for EcbInflationProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_annual_rates(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> Result<AnnualRates, MarketDataError> {
        let url = self.series_url(start_year, end_year);
        debug!("Fetching HICP series from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::NoDataForRange);
        }
        if !status.is_success() {
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                format!("HTTP {}", status),
            ));
        }

        let body = response.text().await?;
        let rates = parse_hicp_csv(&body)?;
        if rates.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }
        Ok(rates
            .into_iter()
            .filter(|(year, _)| *year >= start_year && *year <= end_year)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "KEY,FREQ,REF_AREA,TIME_PERIOD,OBS_VALUE,OBS_STATUS
ICP.M.U2.N.000000.4.ANR,M,U2,2022-11,10.1,A
ICP.M.U2.N.000000.4.ANR,M,U2,2022-12,9.2,A
ICP.M.U2.N.000000.4.ANR,M,U2,2023-01,8.6,A
ICP.M.U2.N.000000.4.ANR,M,U2,2023-02,,A
ICP.M.U2.N.000000.4.ANR,M,U2,2023-03,6.9,A
";

    #[test]
    fn test_parse_hicp_csv_yearly_mean() {
        let rates = parse_hicp_csv(SAMPLE).unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[&2022], dec!(0.0965));
        // Empty observation for 2023-02 is skipped
        assert_eq!(rates[&2023], dec!(0.0775));
    }

    #[test]
    fn test_parse_hicp_csv_empty_body() {
        let rates = parse_hicp_csv("KEY,TIME_PERIOD,OBS_VALUE\n").unwrap();
        assert!(rates.is_empty());
    }

    #[test]
    fn test_parse_hicp_csv_skips_bad_period() {
        let body = "TIME_PERIOD,OBS_VALUE\nnot-a-date,1.0\n2021-06,2.4\n";
        let rates = parse_hicp_csv(body).unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[&2021], dec!(0.024));
    }

    #[test]
    fn test_series_url() {
        let provider = EcbInflationProvider::with_base_url("http://localhost:8080/");
        assert_eq!(
            provider.series_url(2020, 2024),
            "http://localhost:8080/ICP/M.U2.N.000000.4.ANR?startPeriod=2020-01&endPeriod=2024-12&format=csvdata"
        );
    }
}
