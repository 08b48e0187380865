pub mod memo;
pub mod text;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::analysis::alerts::{AlertState, EarningsRow};
use crate::analysis::exposure::{ExposureSummary, TickerExposure};
use crate::data::models::{MacroEvent, Ticker};
use memo::Memo;

/// Everything a presentation layer needs for one refresh
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: NaiveDateTime,
    pub watchlist: Vec<Ticker>,
    /// Every configured event, by date
    pub calendar: Vec<MacroEvent>,
    pub earnings: Vec<EarningsRow>,
    pub exposure_rows: Vec<TickerExposure>,
    pub exposure: ExposureSummary,
    pub alerts: AlertState,
    pub next_event: MacroEvent,
    pub interpretation: String,
    pub memo: Memo,
}
