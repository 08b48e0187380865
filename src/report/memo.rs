use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::analysis::exposure::ExposureSummary;
use crate::analysis::sector_tags::SectorTag;
use crate::data::models::{MacroEvent, Ticker};

/// Framing of the weekly memo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Tone {
    #[default]
    Base,
    Bull,
    Bear,
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(Tone::Base),
            "bull" => Ok(Tone::Bull),
            "bear" => Ok(Tone::Bear),
            other => Err(format!("unknown tone '{}', expected base, bull or bear", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Memo {
    pub opener: String,
    pub exposure_line: String,
    pub earnings_line: String,
    pub closer: String,
}

impl fmt::Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.opener, self.exposure_line, self.earnings_line, self.closer
        )
    }
}

fn percent(share: f64) -> String {
    format!("{:.0}%", share * 100.0)
}

/// One-sentence reading of the dominant exposure against the next macro event
pub fn interpretation(exposure: &ExposureSummary, next_event: &str) -> String {
    let pct = percent(exposure.dominant_share);
    match exposure.dominant_tag {
        SectorTag::RateSensitive => format!(
            "Your watchlist leans rate-sensitive (~{}). If {} surprises hotter/hawkish, expect higher volatility, especially in growth names.",
            pct, next_event
        ),
        SectorTag::Cyclical => format!(
            "Your watchlist leans cyclical (~{}). {} matters because it can shift growth expectations and risk appetite.",
            pct, next_event
        ),
        SectorTag::Defensive => format!(
            "Your watchlist leans defensive (~{}). {} may move the market, but your names may be relatively insulated (not immune).",
            pct, next_event
        ),
        SectorTag::InflationSensitive => format!(
            "Your watchlist has inflation-sensitive exposure (~{}). {} can move input-cost expectations and sector leadership.",
            pct, next_event
        ),
        _ => format!(
            "Mixed/unclear exposure (some tickers missing sector data). {} is still your next macro catalyst.",
            next_event
        ),
    }
}

fn exposure_line(tag: SectorTag) -> &'static str {
    match tag {
        SectorTag::RateSensitive => {
            "Your watchlist leans toward rate-sensitive, growth-oriented names."
        }
        SectorTag::Cyclical => "Your watchlist has meaningful exposure to cyclical sectors.",
        SectorTag::Defensive => {
            "Your watchlist is relatively defensive compared to the broader market."
        }
        SectorTag::InflationSensitive => "Your watchlist has notable inflation-sensitive exposure.",
        _ => "Your watchlist has mixed exposure across sectors.",
    }
}

fn earnings_line(upcoming: &[&Ticker]) -> String {
    if upcoming.is_empty() {
        return "There are no major watchlist earnings scheduled in the coming week.".to_string();
    }
    let names: Vec<&str> = upcoming.iter().map(|t| t.as_str()).collect();
    format!("Earnings to watch this week include {}.", names.join(", "))
}

pub fn compose_memo(
    tone: Tone,
    next_event: &MacroEvent,
    exposure: &ExposureSummary,
    upcoming: &[&Ticker],
) -> Memo {
    let name = &next_event.name;
    let (opener, closer) = match tone {
        Tone::Bull => (
            format!(
                "This week's key macro focus is {}, a potential tailwind if it comes in supportive for risk sentiment.",
                name
            ),
            "Net: the setup looks constructive if the data validates the current narrative, with upside led by rate-sensitive names.",
        ),
        Tone::Bear => (
            format!(
                "This week's key macro focus is {}, a key risk if it surprises against expectations.",
                name
            ),
            "Net: caution is warranted; adverse macro outcomes could drive downside volatility, particularly in rate-sensitive sectors.",
        ),
        Tone::Base => (
            format!(
                "This week's key macro focus is {}, which may influence rate expectations and broader risk sentiment.",
                name
            ),
            "Net: macro data is likely to be the primary near-term driver, with market reactions hinging on surprises versus expectations.",
        ),
    };

    Memo {
        opener,
        exposure_line: exposure_line(exposure.dominant_tag).to_string(),
        earnings_line: earnings_line(upcoming),
        closer: closer.to_string(),
    }
}

pub fn focus_line(next_event: &MacroEvent) -> String {
    format!(
        "Next macro event: {} on {} - {}",
        next_event.name,
        next_event.date.format("%Y-%m-%d"),
        next_event.rationale
    )
}
