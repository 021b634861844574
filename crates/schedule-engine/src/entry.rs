//! Schedule entries, resource bookings and the owner-key sum type the
//! conflict detector scans over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interval::TimeInterval;

/// What a faculty member is doing during a [`ScheduleEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Teaching,
    Lab,
    Meeting,
}

/// What a room is used for during a [`ResourceBooking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Class,
    Lab,
    Meeting,
    Maintenance,
}

/// An entry in one faculty member's schedule.
///
/// `end` may be absent on the wire; it then defaults to one hour after
/// `start` (see [`TimeInterval::with_default_end`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(alias = "startTime")]
    pub start: DateTime<Utc>,
    #[serde(default, alias = "endTime")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ScheduleEntry {
    pub fn interval(&self) -> Result<TimeInterval> {
        TimeInterval::with_default_end(self.start, self.end)
    }
}

/// A booking of a room or lab, optionally made by a faculty member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBooking {
    pub id: String,
    pub resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_name: Option<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: BookingKind,
    #[serde(alias = "startTime")]
    pub start: DateTime<Utc>,
    #[serde(default, alias = "endTime")]
    pub end: Option<DateTime<Utc>>,
}

impl ResourceBooking {
    pub fn interval(&self) -> Result<TimeInterval> {
        TimeInterval::with_default_end(self.start, self.end)
    }
}

/// An event supplied by an external calendar rather than the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

/// The identity two entries must share to be compared for conflicts.
///
/// A room and a faculty member with the same id string are different owners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum OwnerKey {
    Resource(String),
    Faculty(String),
}

/// Anything with a start, an end and (usually) an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum TimedEntry {
    Faculty {
        #[serde(rename = "facultyId")]
        faculty_id: String,
        #[serde(flatten)]
        entry: ScheduleEntry,
    },
    Resource(ResourceBooking),
    External(ExternalEvent),
}

impl TimedEntry {
    pub fn faculty(faculty_id: impl Into<String>, entry: ScheduleEntry) -> Self {
        TimedEntry::Faculty {
            faculty_id: faculty_id.into(),
            entry,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            TimedEntry::Faculty { entry, .. } => &entry.id,
            TimedEntry::Resource(booking) => &booking.id,
            TimedEntry::External(event) => &event.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            TimedEntry::Faculty { entry, .. } => &entry.title,
            TimedEntry::Resource(booking) => &booking.title,
            TimedEntry::External(event) => &event.title,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        match self {
            TimedEntry::Faculty { entry, .. } => entry.start,
            TimedEntry::Resource(booking) => booking.start,
            TimedEntry::External(event) => event.start,
        }
    }

    /// The validated interval, with a missing end defaulted to one hour.
    pub fn interval(&self) -> Result<TimeInterval> {
        match self {
            TimedEntry::Faculty { entry, .. } => entry.interval(),
            TimedEntry::Resource(booking) => booking.interval(),
            TimedEntry::External(event) => TimeInterval::with_default_end(event.start, event.end),
        }
    }

    /// Resource id when present, otherwise faculty id, otherwise `None`.
    pub fn owner_key(&self) -> Option<OwnerKey> {
        match self {
            TimedEntry::Faculty { faculty_id, .. } => Some(OwnerKey::Faculty(faculty_id.clone())),
            TimedEntry::Resource(booking) => Some(OwnerKey::Resource(booking.resource_id.clone())),
            TimedEntry::External(event) => match (&event.resource_id, &event.faculty_id) {
                (Some(resource_id), _) => Some(OwnerKey::Resource(resource_id.clone())),
                (None, Some(faculty_id)) => Some(OwnerKey::Faculty(faculty_id.clone())),
                (None, None) => None,
            },
        }
    }
}

impl From<ResourceBooking> for TimedEntry {
    fn from(booking: ResourceBooking) -> Self {
        TimedEntry::Resource(booking)
    }
}

impl From<ExternalEvent> for TimedEntry {
    fn from(event: ExternalEvent) -> Self {
        TimedEntry::External(event)
    }
}
