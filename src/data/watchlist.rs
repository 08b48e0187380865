use serde::Serialize;

use crate::config;
use crate::data::models::Ticker;

/// Ordered set of tickers owned by the caller for the length of a session.
/// Insertion order is kept for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickerWatchlist {
    tickers: Vec<Ticker>,
}

impl TickerWatchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watchlist seeded with `config::DEFAULT_WATCHLIST`
    pub fn with_defaults() -> Self {
        Self::from_symbols(config::DEFAULT_WATCHLIST.iter().copied())
    }

    pub fn from_symbols<'a>(symbols: impl IntoIterator<Item = &'a str>) -> Self {
        let mut list = Self::new();
        for s in symbols {
            list.add(s);
        }
        list
    }

    /// Add a ticker. Blank input and duplicates are ignored; returns whether
    /// the watchlist changed.
    pub fn add(&mut self, raw: &str) -> bool {
        let Some(ticker) = Ticker::parse(raw) else {
            return false;
        };
        if self.tickers.contains(&ticker) {
            return false;
        }
        self.tickers.push(ticker);
        true
    }

    pub fn clear(&mut self) {
        self.tickers.clear();
    }

    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticker> {
        self.tickers.iter()
    }
}
