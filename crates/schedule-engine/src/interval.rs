//! Validated time intervals and the overlap test shared by every module.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryPolicy;
use crate::error::{Result, ScheduleError};

/// Length applied to entries that arrive without an end time.
pub const DEFAULT_ENTRY_MINUTES: i64 = 60;

/// A time interval with `start < end`.
///
/// Construct through [`TimeInterval::new`]; zero-length and reversed ranges
/// are rejected with [`ScheduleError::InvalidInterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(ScheduleError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build an interval from an optional end, defaulting to one hour after `start`.
    ///
    /// A missing end that would fall past the last representable instant is
    /// reported as [`ScheduleError::OutOfRange`].
    pub fn with_default_end(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<Self> {
        let end = match end {
            Some(end) => end,
            None => start
                .checked_add_signed(Duration::minutes(DEFAULT_ENTRY_MINUTES))
                .ok_or(ScheduleError::OutOfRange(start))?,
        };
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether the two intervals overlap under the given boundary policy.
    ///
    /// The test is symmetric in its two operands for both policies.
    pub fn overlaps(&self, other: &TimeInterval, policy: BoundaryPolicy) -> bool {
        match policy {
            BoundaryPolicy::Inclusive => self.start <= other.end && self.end >= other.start,
            BoundaryPolicy::HalfOpen => self.start < other.end && self.end > other.start,
        }
    }

    /// Minutes shared by both intervals, `0` when they only touch or are disjoint.
    pub fn overlap_minutes(&self, other: &TimeInterval) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            (end - start).num_minutes()
        } else {
            0
        }
    }

    /// Inclusive containment: both endpoints count as inside.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

