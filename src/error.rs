use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Macro calendar has no events configured")]
    EmptyCalendar,

    #[error("Failed to read macro calendar {path}: {source}")]
    CalendarRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid date '{value}' in macro calendar row {row}")]
    InvalidEventDate { row: usize, value: String },

    #[error("Invalid setting {key}={value}: {reason}")]
    InvalidSetting {
        key: &'static str,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, WatchError>;
