use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use crate::data::calendar::MacroCalendar;
use crate::data::watchlist::TickerWatchlist;
use crate::error::{Result, WatchError};
use crate::report::memo::Tone;

/// Tickers a fresh session starts with
pub const DEFAULT_WATCHLIST: &[&str] = &["AAPL", "MSFT"];

/// Alert windows
pub const MACRO_ALERT_HORIZON_HOURS: i64 = 48;
pub const EARNINGS_ALERT_DAYS: i64 = 7;

/// Per-ticker bound on provider lookups
pub const DEFAULT_RESOLVER_TIMEOUT_SECS: u64 = 10;

pub const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Calendar file looked up in the platform config dir when MACRO_CALENDAR is unset
pub const CALENDAR_FILE_NAME: &str = "macro_calendar.csv";

/// Load a `.env` file from the working directory if there is one
pub fn load_env() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }
}

/// Platform config location, e.g. ~/.config/macro-watch/macro_calendar.csv
pub fn default_calendar_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "macro-watch")
        .map(|dirs| dirs.config_dir().join(CALENDAR_FILE_NAME))
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub fmp_api_key: Option<String>,
    pub watchlist: TickerWatchlist,
    pub calendar_path: Option<PathBuf>,
    pub resolver_timeout: Duration,
    pub tone: Tone,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fmp_api_key: None,
            watchlist: TickerWatchlist::with_defaults(),
            calendar_path: None,
            resolver_timeout: Duration::from_secs(DEFAULT_RESOLVER_TIMEOUT_SECS),
            tone: Tone::Base,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build settings from any key lookup (environment, test map, ...)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        settings.fmp_api_key = get("FMP_API_KEY");

        if let Some(raw) = get("WATCHLIST") {
            settings.watchlist = TickerWatchlist::from_symbols(raw.split(','));
        }

        settings.calendar_path = get("MACRO_CALENDAR").map(PathBuf::from);

        if let Some(raw) = get("RESOLVER_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| WatchError::InvalidSetting {
                key: "RESOLVER_TIMEOUT_SECS",
                value: raw.clone(),
                reason: "expected a whole number of seconds".to_string(),
            })?;
            if secs == 0 {
                return Err(WatchError::InvalidSetting {
                    key: "RESOLVER_TIMEOUT_SECS",
                    value: raw,
                    reason: "must be greater than zero".to_string(),
                });
            }
            settings.resolver_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = get("MEMO_TONE") {
            settings.tone = raw.parse().map_err(|reason| WatchError::InvalidSetting {
                key: "MEMO_TONE",
                value: raw.clone(),
                reason,
            })?;
        }

        Ok(settings)
    }

    /// Configured calendar file, then the platform default file, then the
    /// built-in sample around `today`. An empty file is an error.
    pub fn load_calendar(&self, today: NaiveDate) -> Result<MacroCalendar> {
        if let Some(path) = &self.calendar_path {
            return MacroCalendar::load_csv(path);
        }
        if let Some(path) = default_calendar_path().filter(|p| p.exists()) {
            return MacroCalendar::load_csv(&path);
        }
        tracing::info!("No macro calendar file configured, using sample events");
        Ok(MacroCalendar::sample(today))
    }
}
