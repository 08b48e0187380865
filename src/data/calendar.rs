use std::io::Read;
use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::data::models::MacroEvent;
use crate::error::{Result, WatchError};

/// Static set of macro events, kept sorted by date
#[derive(Debug, Clone, Default)]
pub struct MacroCalendar {
    events: Vec<MacroEvent>,
}

impl MacroCalendar {
    pub fn new(mut events: Vec<MacroEvent>) -> Self {
        // stable: same-day events keep their configured order
        events.sort_by_key(|e| e.date);
        Self { events }
    }

    /// Sample releases relative to `today`, used when no calendar file is configured
    pub fn sample(today: NaiveDate) -> Self {
        Self::new(vec![
            MacroEvent::new(
                today + Duration::days(1),
                "CPI (Inflation) release",
                "Can move rates & growth stocks; affects valuations.",
            ),
            MacroEvent::new(
                today + Duration::days(7),
                "FOMC / Fed decision",
                "Rate path + forward guidance; big driver of market regime.",
            ),
            MacroEvent::new(
                today + Duration::days(14),
                "Jobs report (NFP)",
                "Labor tightness -> inflation pressure -> rate expectations.",
            ),
        ])
    }

    /// Load a CSV calendar with header `date,event,why` (dates as YYYY-MM-DD).
    /// A file without events is a configuration error.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let reader = csv::Reader::from_path(path).map_err(|source| WatchError::CalendarRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_reader(reader, path)
    }

    /// Parse CSV content from any reader; `origin` is only used for error messages
    pub fn parse_csv<R: Read>(input: R, origin: &Path) -> Result<Self> {
        Self::from_csv_reader(csv::Reader::from_reader(input), origin)
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>, origin: &Path) -> Result<Self> {
        let mut events = Vec::new();
        for (idx, row) in reader.deserialize::<CalendarRow>().enumerate() {
            let row = row.map_err(|source| WatchError::CalendarRead {
                path: origin.to_path_buf(),
                source,
            })?;
            let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d").map_err(|_| {
                WatchError::InvalidEventDate {
                    row: idx + 1,
                    value: row.date.clone(),
                }
            })?;
            events.push(MacroEvent::new(date, row.event.trim(), row.why.trim()));
        }

        if events.is_empty() {
            return Err(WatchError::EmptyCalendar);
        }
        tracing::info!("Loaded {} macro events from {}", events.len(), origin.display());
        Ok(Self::new(events))
    }

    pub fn events(&self) -> &[MacroEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events starting between `now` and `now + horizon`, both ends inclusive, by date
    pub fn events_within(&self, now: NaiveDateTime, horizon: Duration) -> Vec<&MacroEvent> {
        self.events
            .iter()
            .filter(|e| {
                let until = e.starts_at() - now;
                until >= Duration::zero() && until <= horizon
            })
            .collect()
    }

    /// Earliest configured event regardless of horizon
    pub fn nearest_upcoming(&self) -> Result<&MacroEvent> {
        self.events.first().ok_or(WatchError::EmptyCalendar)
    }
}

#[derive(Debug, Deserialize)]
struct CalendarRow {
    date: String,
    event: String,
    #[serde(default)]
    why: String,
}
