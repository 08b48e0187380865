use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::data::models::Ticker;

/// Source of next-earnings dates. Implementations swallow their own failures:
/// missing data is reported as `None`, never as an error.
#[async_trait]
pub trait EarningsResolver: Send + Sync {
    async fn resolve(&self, ticker: &Ticker) -> Option<NaiveDate>;
}

/// Source of sector names, with the same failure-to-`None` contract
#[async_trait]
pub trait SectorClassifier: Send + Sync {
    async fn resolve(&self, ticker: &Ticker) -> Option<String>;
}

/// Reduce candidate dates to the earliest one
pub fn earliest(candidates: impl IntoIterator<Item = NaiveDate>) -> Option<NaiveDate> {
    candidates.into_iter().min()
}

/// In-memory lookup tables, used for fixtures and offline runs
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    sectors: HashMap<Ticker, String>,
    earnings: HashMap<Ticker, Vec<NaiveDate>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sector(mut self, symbol: &str, sector: &str) -> Self {
        if let Some(t) = Ticker::parse(symbol) {
            self.sectors.insert(t, sector.to_string());
        }
        self
    }

    pub fn with_earnings(mut self, symbol: &str, date: NaiveDate) -> Self {
        if let Some(t) = Ticker::parse(symbol) {
            self.earnings.entry(t).or_default().push(date);
        }
        self
    }
}

#[async_trait]
impl EarningsResolver for StaticDirectory {
    async fn resolve(&self, ticker: &Ticker) -> Option<NaiveDate> {
        self.earnings
            .get(ticker)
            .and_then(|dates| earliest(dates.iter().copied()))
    }
}

#[async_trait]
impl SectorClassifier for StaticDirectory {
    async fn resolve(&self, ticker: &Ticker) -> Option<String> {
        self.sectors.get(ticker).cloned()
    }
}
