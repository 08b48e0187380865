use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::sector_tags::{tags_for, SectorTag};
use crate::data::models::Ticker;
use crate::data::watchlist::TickerWatchlist;

/// Per-ticker classification row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerExposure {
    pub ticker: Ticker,
    pub sector: Option<String>,
    pub tags: Vec<SectorTag>,
}

/// Tag concentration across a watchlist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureSummary {
    pub tag_counts: BTreeMap<SectorTag, usize>,
    pub dominant_tag: SectorTag,
    /// Fraction of tickers carrying the dominant tag, in [0, 1]
    pub dominant_share: f64,
}

impl ExposureSummary {
    pub fn count(&self, tag: SectorTag) -> usize {
        self.tag_counts.get(&tag).copied().unwrap_or(0)
    }
}

/// Classify each ticker by its sector's tags
pub fn classify<F>(watchlist: &TickerWatchlist, mut sector_of: F) -> Vec<TickerExposure>
where
    F: FnMut(&Ticker) -> Option<String>,
{
    watchlist
        .iter()
        .map(|t| {
            let sector = sector_of(t);
            let tags = tags_for(sector.as_deref()).to_vec();
            TickerExposure {
                ticker: t.clone(),
                sector,
                tags,
            }
        })
        .collect()
}

/// Tally tags over classified rows and pick the dominant one.
///
/// A ticker with two tags counts once for each. Ties go to the tag declared
/// first in `SectorTag`. The share divides by ticker count, not tag count.
pub fn summarize(rows: &[TickerExposure]) -> ExposureSummary {
    let mut tag_counts: BTreeMap<SectorTag, usize> = BTreeMap::new();
    for tag in rows.iter().flat_map(|r| r.tags.iter()) {
        *tag_counts.entry(*tag).or_insert(0) += 1;
    }

    let mut dominant: Option<(SectorTag, usize)> = None;
    for tag in SectorTag::ALL {
        let n = tag_counts.get(&tag).copied().unwrap_or(0);
        if n > 0 && dominant.map_or(true, |(_, best)| n > best) {
            dominant = Some((tag, n));
        }
    }

    match dominant {
        Some((tag, n)) => ExposureSummary {
            tag_counts,
            dominant_tag: tag,
            dominant_share: n as f64 / rows.len().max(1) as f64,
        },
        None => ExposureSummary {
            tag_counts,
            dominant_tag: SectorTag::Unknown,
            dominant_share: 0.0,
        },
    }
}

/// Full exposure computation from a watchlist and a sector lookup
pub fn compute<F>(watchlist: &TickerWatchlist, sector_of: F) -> ExposureSummary
where
    F: FnMut(&Ticker) -> Option<String>,
{
    summarize(&classify(watchlist, sector_of))
}
