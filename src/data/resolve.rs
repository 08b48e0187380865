use std::sync::Arc;
use std::time::Duration;

use crate::data::models::{Ticker, TickerSnapshot};
use crate::data::provider::{EarningsResolver, SectorClassifier};
use crate::data::watchlist::TickerWatchlist;

/// Provider pair shared across resolution tasks
#[derive(Clone)]
pub struct Resolvers {
    pub earnings: Arc<dyn EarningsResolver>,
    pub sectors: Arc<dyn SectorClassifier>,
}

impl Resolvers {
    pub fn new(earnings: Arc<dyn EarningsResolver>, sectors: Arc<dyn SectorClassifier>) -> Self {
        Self { earnings, sectors }
    }

    /// Use one provider for both lookups
    pub fn from_provider<P>(provider: P) -> Self
    where
        P: EarningsResolver + SectorClassifier + 'static,
    {
        let provider = Arc::new(provider);
        Self {
            earnings: provider.clone(),
            sectors: provider,
        }
    }
}

async fn resolve_one(resolvers: &Resolvers, ticker: &Ticker) -> TickerSnapshot {
    let (sector, earnings_date) = tokio::join!(
        resolvers.sectors.resolve(ticker),
        resolvers.earnings.resolve(ticker)
    );
    TickerSnapshot {
        ticker: ticker.clone(),
        sector,
        earnings_date,
    }
}

/// Resolve sector and earnings data for every ticker concurrently.
///
/// One task per ticker, each bounded by `timeout`. A ticker whose task times out
/// or fails ends up with absent data; the others are unaffected. Output order
/// follows the watchlist.
pub async fn resolve_watchlist(
    watchlist: &TickerWatchlist,
    resolvers: &Resolvers,
    timeout: Duration,
) -> Vec<TickerSnapshot> {
    let mut handles = Vec::with_capacity(watchlist.len());

    for ticker in watchlist.iter() {
        let t = ticker.clone();
        let r = resolvers.clone();
        let handle = tokio::spawn(async move {
            let outcome = tokio::time::timeout(timeout, resolve_one(&r, &t)).await;
            match outcome {
                Ok(snapshot) => snapshot,
                Err(_) => {
                    tracing::warn!("Data lookup for {} timed out after {:?}", t, timeout);
                    TickerSnapshot::absent(t)
                }
            }
        });
        handles.push((ticker.clone(), handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (ticker, handle) in handles {
        match handle.await {
            Ok(snapshot) => results.push(snapshot),
            Err(e) => {
                tracing::error!("Task join error for {}: {}", ticker, e);
                results.push(TickerSnapshot::absent(ticker));
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::StaticDirectory;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct Stalled;

    #[async_trait]
    impl SectorClassifier for Stalled {
        async fn resolve(&self, ticker: &Ticker) -> Option<String> {
            if ticker.as_str() == "SLOW" {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Some("Energy".to_string())
        }
    }

    struct Panicking;

    #[async_trait]
    impl EarningsResolver for Panicking {
        async fn resolve(&self, ticker: &Ticker) -> Option<NaiveDate> {
            if ticker.as_str() == "BOOM" {
                panic!("provider bug");
            }
            None
        }
    }

    #[tokio::test]
    async fn test_results_follow_watchlist_order() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let dir = StaticDirectory::new()
            .with_sector("AAPL", "Technology")
            .with_earnings("MSFT", date);
        let list = TickerWatchlist::from_symbols(["MSFT", "AAPL", "ZZZZ"]);

        let out = resolve_watchlist(&list, &Resolvers::from_provider(dir), Duration::from_secs(5)).await;
        let symbols: Vec<&str> = out.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(symbols, vec!["MSFT", "AAPL", "ZZZZ"]);
        assert_eq!(out[0].earnings_date, Some(date));
        assert_eq!(out[1].sector.as_deref(), Some("Technology"));
        assert_eq!(out[2], TickerSnapshot::absent(Ticker::parse("ZZZZ").unwrap()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_isolated_to_one_ticker() {
        let resolvers = Resolvers::new(Arc::new(StaticDirectory::new()), Arc::new(Stalled));
        let list = TickerWatchlist::from_symbols(["XOM", "SLOW"]);

        let out = resolve_watchlist(&list, &resolvers, Duration::from_secs(2)).await;
        assert_eq!(out[0].sector.as_deref(), Some("Energy"));
        assert_eq!(out[1].sector, None);
    }

    #[tokio::test]
    async fn test_panicking_provider_yields_absent_data() {
        let resolvers = Resolvers::new(Arc::new(Panicking), Arc::new(StaticDirectory::new()));
        let list = TickerWatchlist::from_symbols(["BOOM", "OK"]);

        let out = resolve_watchlist(&list, &resolvers, Duration::from_secs(2)).await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], TickerSnapshot::absent(Ticker::parse("BOOM").unwrap()));
        assert_eq!(out[1].ticker.as_str(), "OK");
    }

    #[tokio::test]
    async fn test_empty_watchlist() {
        let resolvers = Resolvers::from_provider(StaticDirectory::new());
        let out = resolve_watchlist(&TickerWatchlist::new(), &resolvers, Duration::from_secs(1)).await;
        assert!(out.is_empty());
    }
}
