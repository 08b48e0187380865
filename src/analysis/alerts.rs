use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::config;
use crate::data::calendar::MacroCalendar;
use crate::data::models::{EarningsRecord, MacroEvent, Ticker};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MacroAlert {
    /// A release starts inside the alert horizon; the earliest one is surfaced
    Imminent { event: MacroEvent, hours_until: f64 },
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingEarnings {
    pub ticker: Ticker,
    pub date: NaiveDate,
    pub days_until: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "tickers", rename_all = "snake_case")]
pub enum EarningsAlert {
    /// Sorted by date, then ticker
    Upcoming(Vec<UpcomingEarnings>),
    NoneScheduled,
}

impl EarningsAlert {
    pub fn tickers(&self) -> Vec<&Ticker> {
        match self {
            EarningsAlert::Upcoming(rows) => rows.iter().map(|r| &r.ticker).collect(),
            EarningsAlert::NoneScheduled => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertState {
    pub macro_alert: MacroAlert,
    pub earnings_alert: EarningsAlert,
}

/// Earnings table row for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarningsRow {
    pub ticker: Ticker,
    pub earnings_date: Option<NaiveDate>,
    pub days_until: Option<i64>,
}

/// All records sorted by (date, ticker); missing dates go last
pub fn earnings_table(records: &[EarningsRecord], today: NaiveDate) -> Vec<EarningsRow> {
    let mut rows: Vec<EarningsRow> = records
        .iter()
        .map(|r| EarningsRow {
            ticker: r.ticker.clone(),
            earnings_date: r.earnings_date,
            days_until: r.earnings_date.map(|d| (d - today).num_days()),
        })
        .collect();
    rows.sort_by(|a, b| {
        // None sorts before Some in Option's Ord, so compare presence first
        (a.earnings_date.is_none(), a.earnings_date, &a.ticker)
            .cmp(&(b.earnings_date.is_none(), b.earnings_date, &b.ticker))
    });
    rows
}

pub fn macro_alert(now: NaiveDateTime, calendar: &MacroCalendar) -> MacroAlert {
    let horizon = Duration::hours(config::MACRO_ALERT_HORIZON_HOURS);
    match calendar.events_within(now, horizon).first() {
        Some(event) => {
            let hours_until = (event.starts_at() - now).num_seconds() as f64 / 3600.0;
            MacroAlert::Imminent {
                event: (*event).clone(),
                hours_until,
            }
        }
        None => MacroAlert::Clear,
    }
}

pub fn earnings_alert(today: NaiveDate, records: &[EarningsRecord]) -> EarningsAlert {
    let upcoming: Vec<UpcomingEarnings> = earnings_table(records, today)
        .into_iter()
        .filter_map(|row| {
            let date = row.earnings_date?;
            let days_until = row.days_until?;
            (0..=config::EARNINGS_ALERT_DAYS)
                .contains(&days_until)
                .then(|| UpcomingEarnings {
                    ticker: row.ticker,
                    date,
                    days_until,
                })
        })
        .collect();

    if upcoming.is_empty() {
        EarningsAlert::NoneScheduled
    } else {
        EarningsAlert::Upcoming(upcoming)
    }
}

/// Combine the macro and earnings checks. Pure: safe to re-run on every refresh.
pub fn evaluate(
    now: NaiveDateTime,
    calendar: &MacroCalendar,
    records: &[EarningsRecord],
) -> AlertState {
    AlertState {
        macro_alert: macro_alert(now, calendar),
        earnings_alert: earnings_alert(now.date(), records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn record(sym: &str, offset: Option<i64>) -> EarningsRecord {
        EarningsRecord {
            ticker: Ticker::parse(sym).unwrap(),
            earnings_date: offset.map(|d| today() + Duration::days(d)),
        }
    }

    #[test]
    fn test_cpi_is_imminent() {
        let cal = MacroCalendar::sample(today());
        let now = today().and_hms_opt(0, 0, 0).unwrap();
        match evaluate(now, &cal, &[]).macro_alert {
            MacroAlert::Imminent { event, hours_until } => {
                assert!(event.name.starts_with("CPI"));
                assert!((hours_until - 24.0).abs() < 1e-9);
            }
            MacroAlert::Clear => panic!("expected imminent macro alert"),
        }
    }

    #[test]
    fn test_macro_clear_when_next_event_is_far() {
        let cal = MacroCalendar::new(vec![MacroEvent::new(
            today() + Duration::days(7),
            "FOMC",
            "",
        )]);
        let now = today().and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(macro_alert(now, &cal), MacroAlert::Clear);
    }

    #[test]
    fn test_earnings_window() {
        let records = vec![record("NVDA", Some(3)), record("AMD", Some(10))];
        let alert = earnings_alert(today(), &records);
        let tickers: Vec<&str> = alert.tickers().iter().map(|t| t.as_str()).collect();
        assert_eq!(tickers, vec!["NVDA"]);
    }

    #[test]
    fn test_earnings_window_inclusive_and_no_past() {
        let records = vec![
            record("EDGE", Some(7)),
            record("TODAY", Some(0)),
            record("PAST", Some(-1)),
        ];
        match earnings_alert(today(), &records) {
            EarningsAlert::Upcoming(rows) => {
                let got: Vec<(&str, i64)> =
                    rows.iter().map(|r| (r.ticker.as_str(), r.days_until)).collect();
                assert_eq!(got, vec![("TODAY", 0), ("EDGE", 7)]);
            }
            EarningsAlert::NoneScheduled => panic!("expected upcoming earnings"),
        }
    }

    #[test]
    fn test_missing_dates_never_upcoming() {
        let records = vec![record("AAPL", None), record("MSFT", None)];
        assert_eq!(earnings_alert(today(), &records), EarningsAlert::NoneScheduled);
    }

    #[test]
    fn test_upcoming_sorted_by_date_then_ticker() {
        let records = vec![
            record("ZZ", Some(2)),
            record("MM", Some(5)),
            record("AA", Some(2)),
            record("NA", None),
        ];
        let alert = earnings_alert(today(), &records);
        let tickers: Vec<&str> = alert.tickers().iter().map(|t| t.as_str()).collect();
        assert_eq!(tickers, vec!["AA", "ZZ", "MM"]);
    }

    #[test]
    fn test_earnings_table_missing_dates_last() {
        let records = vec![record("NA", None), record("BB", Some(30)), record("AA", Some(1))];
        let table = earnings_table(&records, today());
        let order: Vec<&str> = table.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["AA", "BB", "NA"]);
        assert_eq!(table[1].days_until, Some(30));
        assert_eq!(table[2].days_until, None);
    }

    #[test]
    fn test_empty_inputs() {
        let now = today().and_hms_opt(9, 0, 0).unwrap();
        let state = evaluate(now, &MacroCalendar::default(), &[]);
        assert_eq!(state.macro_alert, MacroAlert::Clear);
        assert_eq!(state.earnings_alert, EarningsAlert::NoneScheduled);
    }
}
