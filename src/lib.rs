//! Watchlist risk tracker: joins a ticker watchlist against a macro calendar
//! and per-company earnings dates, producing alerts, a sector-exposure summary
//! and a short weekly memo.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;

pub use analysis::alerts::{AlertState, EarningsAlert, MacroAlert, UpcomingEarnings};
pub use analysis::exposure::{ExposureSummary, TickerExposure};
pub use analysis::sector_tags::SectorTag;
pub use data::calendar::MacroCalendar;
pub use data::models::{EarningsRecord, MacroEvent, Ticker, TickerSnapshot};
pub use data::provider::{EarningsResolver, SectorClassifier, StaticDirectory};
pub use data::resolve::Resolvers;
pub use data::watchlist::TickerWatchlist;
pub use error::{Result, WatchError};
pub use pipeline::{evaluate, EvaluateOptions};
pub use report::memo::Tone;
pub use report::Report;
