use std::fmt;

use serde::Serialize;

/// Macro-sensitivity tags. Declaration order is the tie-break priority when
/// two tags have the same count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectorTag {
    RateSensitive,
    Growth,
    Cyclical,
    MacroSensitive,
    Defensive,
    InflationSensitive,
    Commodities,
    Unknown,
}

impl SectorTag {
    pub const ALL: [SectorTag; 8] = [
        SectorTag::RateSensitive,
        SectorTag::Growth,
        SectorTag::Cyclical,
        SectorTag::MacroSensitive,
        SectorTag::Defensive,
        SectorTag::InflationSensitive,
        SectorTag::Commodities,
        SectorTag::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectorTag::RateSensitive => "rate-sensitive",
            SectorTag::Growth => "growth",
            SectorTag::Cyclical => "cyclical",
            SectorTag::MacroSensitive => "macro-sensitive",
            SectorTag::Defensive => "defensive",
            SectorTag::InflationSensitive => "inflation-sensitive",
            SectorTag::Commodities => "commodities",
            SectorTag::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SectorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

use SectorTag::*;

/// Sector name -> macro tags. Includes the FMP spellings
/// ("Consumer Cyclical", "Healthcare", ...) next to the GICS ones.
pub const SECTOR_TAGS: &[(&str, &[SectorTag])] = &[
    ("Technology", &[RateSensitive, Growth]),
    ("Communication Services", &[RateSensitive, Growth]),
    ("Consumer Discretionary", &[Cyclical, RateSensitive]),
    ("Consumer Cyclical", &[Cyclical, RateSensitive]),
    ("Financial Services", &[RateSensitive, MacroSensitive]),
    ("Financials", &[RateSensitive, MacroSensitive]),
    ("Real Estate", &[RateSensitive]),
    ("Utilities", &[Defensive, RateSensitive]),
    ("Consumer Staples", &[Defensive, InflationSensitive]),
    ("Consumer Defensive", &[Defensive, InflationSensitive]),
    ("Health Care", &[Defensive]),
    ("Healthcare", &[Defensive]),
    ("Industrials", &[Cyclical]),
    ("Energy", &[InflationSensitive, Commodities]),
    ("Basic Materials", &[InflationSensitive, Commodities]),
    ("Materials", &[InflationSensitive, Commodities]),
];

/// Tags for a sector; missing or unmapped sectors get exactly `[Unknown]`
pub fn tags_for(sector: Option<&str>) -> &'static [SectorTag] {
    sector
        .map(str::trim)
        .and_then(|name| {
            SECTOR_TAGS
                .iter()
                .find(|(s, _)| s.eq_ignore_ascii_case(name))
                .map(|(_, tags)| *tags)
        })
        .unwrap_or(&[Unknown])
}
