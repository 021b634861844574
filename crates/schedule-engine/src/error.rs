//! Error types for schedule-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Invalid interval: end {end} is not after start {start}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Instant out of range: {0} cannot be extended by the default entry length")]
    OutOfRange(DateTime<Utc>),

    #[error("Invalid working hours: {start_hour}:00-{end_hour}:00")]
    InvalidWorkingHours { start_hour: u32, end_hour: u32 },

    #[error("Unknown availability filter: {0} (expected day, week or month)")]
    UnknownFilter(String),

    #[error("Unknown resource filter: {0} (expected all, classroom, lab, available or occupied)")]
    UnknownResourceFilter(String),

    #[error("Faculty member not found: {0}")]
    FacultyNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar gateway error: {0}")]
    Gateway(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
