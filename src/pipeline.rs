use std::time::Duration;

use chrono::NaiveDateTime;

use crate::analysis::{alerts, exposure};
use crate::config;
use crate::data::calendar::MacroCalendar;
use crate::data::models::EarningsRecord;
use crate::data::resolve::{resolve_watchlist, Resolvers};
use crate::data::watchlist::TickerWatchlist;
use crate::error::Result;
use crate::report::memo::{self, Tone};
use crate::report::Report;

#[derive(Debug, Clone, Copy)]
pub struct EvaluateOptions {
    pub tone: Tone,
    pub resolver_timeout: Duration,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            tone: Tone::Base,
            resolver_timeout: Duration::from_secs(config::DEFAULT_RESOLVER_TIMEOUT_SECS),
        }
    }
}

/// Run one full refresh: resolve provider data for the watchlist, then derive
/// earnings table, exposure, alerts and memo. Nothing is cached between calls.
///
/// Fails only when the calendar is empty, since the memo needs a next event.
pub async fn evaluate(
    watchlist: &TickerWatchlist,
    calendar: &MacroCalendar,
    resolvers: &Resolvers,
    now: NaiveDateTime,
    options: EvaluateOptions,
) -> Result<Report> {
    let next_event = calendar.nearest_upcoming()?.clone();

    let snapshots = resolve_watchlist(watchlist, resolvers, options.resolver_timeout).await;
    let records: Vec<EarningsRecord> = snapshots.iter().map(|s| s.earnings_record()).collect();

    let exposure_rows = exposure::classify(watchlist, |t| {
        snapshots
            .iter()
            .find(|s| &s.ticker == t)
            .and_then(|s| s.sector.clone())
    });
    let summary = exposure::summarize(&exposure_rows);
    let alert_state = alerts::evaluate(now, calendar, &records);

    tracing::info!(
        tickers = watchlist.len(),
        dominant = %summary.dominant_tag,
        share = summary.dominant_share,
        "Evaluated watchlist"
    );

    let upcoming = alert_state.earnings_alert.tickers();
    let memo = memo::compose_memo(options.tone, &next_event, &summary, &upcoming);
    let interpretation = memo::interpretation(&summary, &next_event.name);

    Ok(Report {
        generated_at: now,
        watchlist: watchlist.tickers().to_vec(),
        calendar: calendar.events().to_vec(),
        earnings: alerts::earnings_table(&records, now.date()),
        exposure_rows,
        exposure: summary,
        alerts: alert_state,
        next_event,
        interpretation,
        memo,
    })
}
