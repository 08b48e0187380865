use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Upper-cased ticker symbol, e.g. `NVDA`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Normalize raw user input. Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let symbol = raw.trim();
        if symbol.is_empty() {
            return None;
        }
        Some(Ticker(symbol.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticker {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Ticker::parse(&raw).ok_or_else(|| format!("invalid ticker symbol '{}'", raw))
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A scheduled macroeconomic release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroEvent {
    pub date: NaiveDate,
    pub name: String,
    /// Why the release matters for markets
    pub rationale: String,
}

impl MacroEvent {
    pub fn new(date: NaiveDate, name: impl Into<String>, rationale: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            rationale: rationale.into(),
        }
    }

    /// Events are treated as starting at midnight of their calendar date
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(chrono::NaiveTime::MIN)
    }
}

/// Next earnings date for one ticker; `None` when the provider had no data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsRecord {
    pub ticker: Ticker,
    pub earnings_date: Option<NaiveDate>,
}

/// Everything the data providers returned for one ticker in a single evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerSnapshot {
    pub ticker: Ticker,
    pub sector: Option<String>,
    pub earnings_date: Option<NaiveDate>,
}

impl TickerSnapshot {
    pub fn absent(ticker: Ticker) -> Self {
        Self {
            ticker,
            sector: None,
            earnings_date: None,
        }
    }

    pub fn earnings_record(&self) -> EarningsRecord {
        EarningsRecord {
            ticker: self.ticker.clone(),
            earnings_date: self.earnings_date,
        }
    }
}
