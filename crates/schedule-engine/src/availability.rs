//! Hourly availability within working hours for a single faculty member.
//!
//! The calculator walks every working day in a day/week/month window, splits
//! the working hours into one-hour slots and marks each slot busy when any of
//! the owner's entries overlaps it. Slots are half-open `[h, h+1h)` and are
//! compared half-open, so an entry starting at 14:00 leaves the 13:00 slot free.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::boundary::BoundaryPolicy;
use crate::entry::ScheduleEntry;
use crate::error::{Result, ScheduleError};
use crate::interval::TimeInterval;

/// The span of calendar days an availability query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityFilter {
    /// The calendar day containing the reference instant.
    #[default]
    Day,
    /// The Monday-to-Sunday week containing the reference instant.
    Week,
    /// The calendar month containing the reference instant.
    Month,
}

impl FromStr for AvailabilityFilter {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(ScheduleError::UnknownFilter(other.to_string())),
        }
    }
}

impl fmt::Display for AvailabilityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        };
        f.write_str(name)
    }
}

/// Working-hours policy. Defaults to 08:00-17:00, Monday to Friday, UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    /// First working hour (inclusive).
    pub work_start_hour: u32,
    /// Last working hour (exclusive).
    pub work_end_hour: u32,
    pub working_days: Vec<Weekday>,
    /// Timezone that defines calendar days and wall-clock working hours.
    pub timezone: Tz,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            work_start_hour: 8,
            work_end_hour: 17,
            working_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            timezone: Tz::UTC,
        }
    }
}

impl AvailabilityConfig {
    pub fn validate(&self) -> Result<()> {
        if self.work_start_hour >= self.work_end_hour || self.work_end_hour > 24 {
            return Err(ScheduleError::InvalidWorkingHours {
                start_hour: self.work_start_hour,
                end_hour: self.work_end_hour,
            });
        }
        Ok(())
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.working_days.contains(&date.weekday())
    }

    pub fn slots_per_day(&self) -> u32 {
        self.work_end_hour.saturating_sub(self.work_start_hour)
    }
}

/// A one-hour window starting at `instant`, tagged available or busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub instant: DateTime<Utc>,
    pub available: bool,
}

/// First and last calendar day (both inclusive) covered by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DayWindow {
    pub fn for_filter(filter: AvailabilityFilter, reference: NaiveDate) -> Self {
        match filter {
            AvailabilityFilter::Day => Self {
                first: reference,
                last: reference,
            },
            AvailabilityFilter::Week => {
                // Clamped to chrono's date range for weeks that straddle it.
                let offset = u64::from(reference.weekday().num_days_from_monday());
                Self {
                    first: reference
                        .checked_sub_days(Days::new(offset))
                        .unwrap_or(NaiveDate::MIN),
                    last: reference
                        .checked_add_days(Days::new(6 - offset))
                        .unwrap_or(NaiveDate::MAX),
                }
            }
            AvailabilityFilter::Month => {
                let first = reference.with_day(1).unwrap_or(reference);
                let next_month = if first.month() == 12 {
                    NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
                };
                let last = next_month
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(reference);
                Self { first, last }
            }
        }
    }

    /// Every date in the window, in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last;
        std::iter::successors(Some(self.first), |d| d.succ_opt()).take_while(move |d| *d <= last)
    }
}

/// Compute hourly slots for one owner's entries within the filter window.
///
/// Non-working days produce no slots. Entries with an invalid interval are
/// skipped. The result is in chronological order.
pub fn get_available_slots(
    owner_entries: &[ScheduleEntry],
    filter: AvailabilityFilter,
    reference: DateTime<Utc>,
    config: &AvailabilityConfig,
) -> Vec<AvailabilitySlot> {
    let busy: Vec<TimeInterval> = owner_entries
        .iter()
        .filter_map(|entry| match entry.interval() {
            Ok(interval) => Some(interval),
            Err(err) => {
                debug!(id = %entry.id, error = %err, "skipping entry with invalid interval");
                None
            }
        })
        .collect();

    let tz = config.timezone;
    let reference_day = reference.with_timezone(&tz).date_naive();
    let window = DayWindow::for_filter(filter, reference_day);

    let mut slots = Vec::new();
    for day in window.days().filter(|d| config.is_working_day(*d)) {
        for hour in config.work_start_hour..config.work_end_hour {
            let Some(instant) = local_hour(tz, day, hour) else {
                continue;
            };
            let Some(slot) = instant
                .checked_add_signed(Duration::hours(1))
                .and_then(|end| TimeInterval::new(instant, end).ok())
            else {
                continue;
            };
            let available = !busy
                .iter()
                .any(|interval| slot.overlaps(interval, BoundaryPolicy::HalfOpen));
            slots.push(AvailabilitySlot { instant, available });
        }
    }
    slots
}

/// Only the slots that are free.
pub fn free_slots(slots: &[AvailabilitySlot]) -> Vec<AvailabilitySlot> {
    slots.iter().copied().filter(|s| s.available).collect()
}

/// Group slots by their calendar day in `tz`, preserving slot order.
pub fn slots_by_day(slots: &[AvailabilitySlot], tz: Tz) -> BTreeMap<NaiveDate, Vec<AvailabilitySlot>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<AvailabilitySlot>> = BTreeMap::new();
    for slot in slots {
        let day = slot.instant.with_timezone(&tz).date_naive();
        grouped.entry(day).or_default().push(*slot);
    }
    grouped
}

/// The UTC instant of `hour:00` local time on `day`, `None` for hours that
/// do not exist locally (DST gaps) or are out of range.
fn local_hour(tz: Tz, day: NaiveDate, hour: u32) -> Option<DateTime<Utc>> {
    let naive = day.and_hms_opt(hour, 0, 0)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
