use std::fmt::Write;

use crate::analysis::alerts::{EarningsAlert, MacroAlert};
use crate::analysis::sector_tags::SectorTag;
use crate::config;
use crate::report::Report;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}\n{}", title, "-".repeat(title.len()));
}

fn tag_list(tags: &[SectorTag]) -> String {
    tags.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
}

/// Plain-text rendering of a report, one section per dashboard panel
pub fn render(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Macro x Markets  ({})",
        report.generated_at.format("%Y-%m-%d %H:%M")
    );

    heading(&mut out, "Watchlist");
    if report.watchlist.is_empty() {
        out.push_str("No tickers yet.\n");
    } else {
        let names: Vec<&str> = report.watchlist.iter().map(|t| t.as_str()).collect();
        let _ = writeln!(out, "{}", names.join(", "));
    }

    heading(&mut out, "Macro calendar");
    for ev in &report.calendar {
        let _ = writeln!(out, "{:<12} {:<28} {}", ev.date.format("%Y-%m-%d"), ev.name, ev.rationale);
    }

    heading(&mut out, "Company events (earnings)");
    for row in &report.earnings {
        let date = row
            .earnings_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "n/a".to_string());
        let days = row
            .days_until
            .map(|d| format!("{:+}d", d))
            .unwrap_or_default();
        let _ = writeln!(out, "{:<8} {:<12} {}", row.ticker, date, days);
    }

    heading(&mut out, "Alerts");
    match &report.alerts.macro_alert {
        MacroAlert::Imminent { event, .. } => {
            let _ = writeln!(
                out,
                "[MACRO] In the next {} hours: {} on {} - {}",
                config::MACRO_ALERT_HORIZON_HOURS,
                event.name,
                event.date.format("%Y-%m-%d"),
                event.rationale
            );
        }
        MacroAlert::Clear => {
            let _ = writeln!(
                out,
                "[CLEAR] No major releases in the next {} hours. Volatility risk from macro is low.",
                config::MACRO_ALERT_HORIZON_HOURS
            );
        }
    }
    match &report.alerts.earnings_alert {
        EarningsAlert::Upcoming(_) => {
            let names: Vec<&str> = report
                .alerts
                .earnings_alert
                .tickers()
                .iter()
                .map(|t| t.as_str())
                .collect();
            let _ = writeln!(
                out,
                "[EARNINGS] In the next {} days: {}",
                config::EARNINGS_ALERT_DAYS,
                names.join(", ")
            );
        }
        EarningsAlert::NoneScheduled => {
            let _ = writeln!(
                out,
                "[INFO] No watchlist earnings in the next {} days (based on available dates).",
                config::EARNINGS_ALERT_DAYS
            );
        }
    }

    heading(&mut out, "Exposure & interpretation");
    for row in &report.exposure_rows {
        let _ = writeln!(
            out,
            "{:<8} {:<24} {}",
            row.ticker,
            row.sector.as_deref().unwrap_or("-"),
            tag_list(&row.tags)
        );
    }
    let _ = writeln!(out, "\n{}", report.interpretation);

    heading(&mut out, "Weekly memo");
    let _ = writeln!(out, "{}", report.memo);

    heading(&mut out, "This week: what should you care about?");
    let _ = writeln!(out, "{}", super::memo::focus_line(&report.next_event));
    let upcoming = report.alerts.earnings_alert.tickers();
    if upcoming.is_empty() {
        let _ = writeln!(
            out,
            "No watchlist earnings in the next {} days (based on available data).",
            config::EARNINGS_ALERT_DAYS
        );
    } else {
        let names: Vec<&str> = upcoming.iter().map(|t| t.as_str()).collect();
        let _ = writeln!(
            out,
            "Earnings in the next {} days (watchlist): {}",
            config::EARNINGS_ALERT_DAYS,
            names.join(", ")
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::alerts::{self, AlertState};
    use crate::analysis::exposure;
    use crate::data::calendar::MacroCalendar;
    use crate::data::models::EarningsRecord;
    use crate::data::watchlist::TickerWatchlist;
    use crate::report::memo::{self, Tone};
    use chrono::NaiveDate;

    #[test]
    fn test_render_empty_watchlist() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let now = today.and_hms_opt(8, 0, 0).unwrap();
        let cal = MacroCalendar::sample(today);
        let list = TickerWatchlist::new();
        let rows = exposure::classify(&list, |_| None);
        let summary = exposure::summarize(&rows);
        let records: Vec<EarningsRecord> = Vec::new();
        let next = cal.nearest_upcoming().unwrap().clone();

        let report = Report {
            generated_at: now,
            watchlist: Vec::new(),
            calendar: cal.events().to_vec(),
            earnings: Vec::new(),
            exposure_rows: rows,
            interpretation: memo::interpretation(&summary, &next.name),
            memo: memo::compose_memo(Tone::Base, &next, &summary, &[]),
            exposure: summary,
            alerts: AlertState {
                macro_alert: alerts::macro_alert(now, &cal),
                earnings_alert: alerts::earnings_alert(today, &records),
            },
            next_event: next,
        };

        let text = render(&report);
        assert!(text.contains("No tickers yet."));
        assert!(text.contains("[MACRO] In the next 48 hours: CPI (Inflation) release on 2026-10-18"));
        assert!(text.contains("[INFO] No watchlist earnings in the next 7 days"));
        assert!(text.contains("Mixed/unclear exposure"));
        assert!(text.contains("Next macro event: CPI (Inflation) release on 2026-10-18"));
        assert!(text.contains("Jobs report (NFP)"));
        assert!(text.ends_with("No watchlist earnings in the next 7 days (based on available data).\n"));
    }
}
