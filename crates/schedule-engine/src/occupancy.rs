//! Room and lab occupancy at a point in time.
//!
//! Occupancy uses inclusive containment: a room is still occupied at the
//! exact instant its booking ends.

use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::entry::{BookingKind, ResourceBooking};
use crate::error::{Result, ScheduleError};
use crate::roster::{Resource, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Available,
    Occupied,
    Maintenance,
}

/// Which resources a listing shows: by kind, by current status, or all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceFilter {
    #[default]
    All,
    Classroom,
    Lab,
    Available,
    Occupied,
}

impl ResourceFilter {
    /// Status filters are evaluated at `now`; rooms under maintenance match
    /// neither `Available` nor `Occupied`.
    pub fn matches(&self, resource: &Resource, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Classroom => resource.kind == ResourceKind::Classroom,
            Self::Lab => resource.kind == ResourceKind::Lab,
            Self::Available => resource_status(&resource.schedule, now) == ResourceStatus::Available,
            Self::Occupied => resource_status(&resource.schedule, now) == ResourceStatus::Occupied,
        }
    }
}

impl FromStr for ResourceFilter {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "classroom" => Ok(Self::Classroom),
            "lab" => Ok(Self::Lab),
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            other => Err(ScheduleError::UnknownResourceFilter(other.to_string())),
        }
    }
}

/// Status of a resource at `at`, decided by the first booking (in list
/// order) whose range contains `at`.
pub fn resource_status(bookings: &[ResourceBooking], at: DateTime<Utc>) -> ResourceStatus {
    let current = bookings.iter().find(|booking| {
        booking
            .interval()
            .map(|interval| interval.contains(at))
            .unwrap_or(false)
    });
    match current {
        Some(booking) if booking.kind == BookingKind::Maintenance => ResourceStatus::Maintenance,
        Some(_) => ResourceStatus::Occupied,
        None => ResourceStatus::Available,
    }
}

/// When the resource is next free: `now` if it is free already, otherwise
/// the earliest booking end after `now`.
pub fn next_available_time(resource: &Resource, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if resource_status(&resource.schedule, now) == ResourceStatus::Available {
        return Some(now);
    }
    resource
        .schedule
        .iter()
        .filter_map(|booking| booking.interval().ok())
        .map(|interval| interval.end())
        .filter(|end| *end > now)
        .min()
}

/// Bookings that start within, end within, or span the calendar day `date`
/// in timezone `tz`.
pub fn bookings_for_day<'a>(
    bookings: &'a [ResourceBooking],
    date: NaiveDate,
    tz: Tz,
) -> Vec<&'a ResourceBooking> {
    let Some(day_start) = date
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|dt| dt.with_timezone(&Utc))
    else {
        return Vec::new();
    };
    let next_day = date
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| day_start.checked_add_signed(Duration::days(1)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    bookings
        .iter()
        .filter(|booking| {
            let Ok(interval) = booking.interval() else {
                return false;
            };
            let (start, end) = (interval.start(), interval.end());
            (start >= day_start && start < next_day)
                || (end > day_start && end <= next_day)
                || (start <= day_start && end >= next_day)
        })
        .collect()
}

/// Counts per status plus the share of classrooms and labs in use.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub maintenance: usize,
    pub classroom_usage_percent: f64,
    pub lab_usage_percent: f64,
}

impl OccupancySummary {
    pub fn at(resources: &[Resource], now: DateTime<Utc>) -> Self {
        let mut summary = Self {
            total: resources.len(),
            ..Self::default()
        };
        let (mut classrooms, mut classrooms_used) = (0usize, 0usize);
        let (mut labs, mut labs_used) = (0usize, 0usize);

        for resource in resources {
            let status = resource_status(&resource.schedule, now);
            match status {
                ResourceStatus::Available => summary.available += 1,
                ResourceStatus::Occupied => summary.occupied += 1,
                ResourceStatus::Maintenance => summary.maintenance += 1,
            }
            let occupied = usize::from(status == ResourceStatus::Occupied);
            match resource.kind {
                ResourceKind::Classroom => {
                    classrooms += 1;
                    classrooms_used += occupied;
                }
                ResourceKind::Lab => {
                    labs += 1;
                    labs_used += occupied;
                }
            }
        }

        summary.classroom_usage_percent = usage(classrooms_used, classrooms);
        summary.lab_usage_percent = usage(labs_used, labs);
        summary
    }
}

fn usage(used: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}
