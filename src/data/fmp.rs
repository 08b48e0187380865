use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::config;
use crate::data::models::Ticker;
use crate::data::provider::{earliest, EarningsResolver, SectorClassifier};

/// Financial Modeling Prep client serving both sector and earnings lookups
#[derive(Debug, Clone)]
pub struct FmpClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    /// Earnings dates before this day are history, not the next report
    as_of: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    #[serde(default)]
    sector: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EarningsRow {
    date: String,
}

impl FmpClient {
    pub fn new(api_key: impl Into<String>, as_of: NaiveDate, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: config::FMP_BASE_URL.to_string(),
            as_of,
        })
    }

    /// Point the client at another FMP-compatible host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_text(&self, endpoint: &str, ticker: &Ticker) -> Result<String> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::info!("Fetching FMP {} for {}", endpoint, ticker);

        let resp = self
            .http
            .get(&url)
            .query(&[("symbol", ticker.as_str()), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to fetch {} for {}", endpoint, ticker))?
            .error_for_status()
            .with_context(|| format!("FMP rejected {} request for {}", endpoint, ticker))?;

        resp.text().await.context("Failed to read response body")
    }

    pub async fn fetch_sector(&self, ticker: &Ticker) -> Result<Option<String>> {
        let text = self.get_text("profile", ticker).await?;
        parse_profile_sector(&text)
            .with_context(|| format!("Failed to parse profile JSON for {}", ticker))
    }

    pub async fn fetch_earnings_dates(&self, ticker: &Ticker) -> Result<Vec<NaiveDate>> {
        let text = self.get_text("earnings", ticker).await?;
        parse_earnings_dates(&text)
            .with_context(|| format!("Failed to parse earnings JSON for {}", ticker))
    }
}

#[async_trait]
impl SectorClassifier for FmpClient {
    async fn resolve(&self, ticker: &Ticker) -> Option<String> {
        match self.fetch_sector(ticker).await {
            Ok(sector) => sector,
            Err(e) => {
                tracing::warn!("Sector unavailable for {}: {:#}", ticker, e);
                None
            }
        }
    }
}

#[async_trait]
impl EarningsResolver for FmpClient {
    async fn resolve(&self, ticker: &Ticker) -> Option<NaiveDate> {
        match self.fetch_earnings_dates(ticker).await {
            Ok(dates) => next_earnings_date(dates, self.as_of),
            Err(e) => {
                tracing::warn!("Earnings date unavailable for {}: {:#}", ticker, e);
                None
            }
        }
    }
}

/// Sector of the first profile row; blank strings count as missing
fn parse_profile_sector(text: &str) -> Result<Option<String>> {
    let rows: Vec<ProfileRow> = serde_json::from_str(text)?;
    Ok(rows
        .into_iter()
        .next()
        .and_then(|r| r.sector)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Every parseable report date; malformed dates are skipped
fn parse_earnings_dates(text: &str) -> Result<Vec<NaiveDate>> {
    let rows: Vec<EarningsRow> = serde_json::from_str(text)?;
    Ok(rows
        .iter()
        .filter_map(|r| NaiveDate::parse_from_str(r.date.trim(), "%Y-%m-%d").ok())
        .collect())
}

/// Earliest candidate on or after `as_of`
fn next_earnings_date(candidates: Vec<NaiveDate>, as_of: NaiveDate) -> Option<NaiveDate> {
    earliest(candidates.into_iter().filter(|d| *d >= as_of))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_sector() {
        let body = r#"[{"symbol":"AAPL","companyName":"Apple Inc.","sector":"Technology"}]"#;
        assert_eq!(parse_profile_sector(body).unwrap().as_deref(), Some("Technology"));
    }

    #[test]
    fn test_parse_profile_blank_or_missing_sector() {
        assert_eq!(parse_profile_sector(r#"[{"symbol":"SPY","sector":""}]"#).unwrap(), None);
        assert_eq!(parse_profile_sector(r#"[{"symbol":"SPY"}]"#).unwrap(), None);
        assert_eq!(parse_profile_sector("[]").unwrap(), None);
    }

    #[test]
    fn test_parse_profile_error_payload() {
        assert!(parse_profile_sector(r#"{"Error Message":"Invalid API KEY."}"#).is_err());
    }

    #[test]
    fn test_next_earnings_skips_history() {
        let body = r#"[
            {"symbol":"NVDA","date":"2026-11-19","epsActual":null},
            {"symbol":"NVDA","date":"2026-08-27","epsActual":1.05},
            {"symbol":"NVDA","date":"2027-02-25","epsActual":null},
            {"symbol":"NVDA","date":"not-a-date"}
        ]"#;
        let dates = parse_earnings_dates(body).unwrap();
        assert_eq!(dates.len(), 3);

        let as_of = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(
            next_earnings_date(dates, as_of),
            NaiveDate::from_ymd_opt(2026, 11, 19)
        );
    }

    #[test]
    fn test_next_earnings_only_history() {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let past = vec![NaiveDate::from_ymd_opt(2026, 7, 30).unwrap()];
        assert_eq!(next_earnings_date(past, as_of), None);
    }

    #[tokio::test]
    async fn test_unreachable_host_resolves_to_none() {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let client = FmpClient::new("demo", as_of, Duration::from_secs(2))
            .unwrap()
            .with_base_url("http://127.0.0.1:1/");
        let t = Ticker::parse("AAPL").unwrap();

        assert_eq!(SectorClassifier::resolve(&client, &t).await, None);
        assert_eq!(EarningsResolver::resolve(&client, &t).await, None);
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let client = FmpClient::new("demo", as_of, Duration::from_secs(2))
            .unwrap()
            .with_base_url("http://localhost:8080/stable/");
        assert_eq!(client.base_url, "http://localhost:8080/stable");
    }

    #[tokio::test]
    #[ignore] // Only run with a valid FMP_API_KEY
    async fn test_live_profile() {
        let key = crate::config::Settings::from_env()
            .unwrap()
            .fmp_api_key
            .expect("FMP_API_KEY not set");
        let today = chrono::Local::now().date_naive();
        let client = FmpClient::new(key, today, Duration::from_secs(15)).unwrap();
        let t = Ticker::parse("AAPL").unwrap();
        let sector = SectorClassifier::resolve(&client, &t).await;
        println!("AAPL sector: {:?}", sector);
        assert!(sector.is_some());
    }
}
