//! Faculty members, rooms and the queries a dashboard runs over them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::availability::{self, AvailabilityConfig, AvailabilityFilter, AvailabilitySlot};
use crate::conflict::{self, ConflictOptions, ConflictReport};
use crate::entry::{ResourceBooking, ScheduleEntry, TimedEntry};
use crate::error::{Result, ScheduleError};
use crate::gateway::CalendarGateway;
use crate::interval::TimeInterval;
use crate::occupancy::ResourceFilter;
use crate::workload::{Workload, WorkloadField};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub workload: Workload,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Classroom,
    Lab,
}

/// A bookable room or lab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub floor: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub schedule: Vec<ResourceBooking>,
}

/// A change to one category of a faculty member's weekly workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadUpdate {
    pub faculty_id: String,
    pub field: WorkloadField,
    pub value: f64,
}

/// Everything the engine knows about: faculty with their schedules and rooms
/// with their bookings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub faculty: Vec<FacultyMember>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Roster {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn faculty_member(&self, id: &str) -> Option<&FacultyMember> {
        self.faculty.iter().find(|f| f.id == id)
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// All faculty entries followed by all resource bookings, in roster order.
    pub fn timed_entries(&self) -> Vec<TimedEntry> {
        let faculty = self.faculty.iter().flat_map(|member| {
            member
                .schedule
                .iter()
                .map(|entry| TimedEntry::faculty(member.id.clone(), entry.clone()))
        });
        let bookings = self
            .resources
            .iter()
            .flat_map(|resource| resource.schedule.iter().cloned().map(TimedEntry::Resource));
        faculty.chain(bookings).collect()
    }

    pub fn detect_conflicts(&self, options: &ConflictOptions) -> ConflictReport {
        conflict::detect_conflicts_with(&self.timed_entries(), options)
    }

    /// Like [`Roster::detect_conflicts`], with the gateway's events for
    /// `window` appended to the roster entries before scanning.
    pub fn detect_conflicts_with_calendar(
        &self,
        gateway: &dyn CalendarGateway,
        window: &TimeInterval,
        options: &ConflictOptions,
    ) -> Result<ConflictReport> {
        let mut entries = self.timed_entries();
        entries.extend(
            gateway
                .fetch_events(window)?
                .into_iter()
                .map(TimedEntry::External),
        );
        Ok(conflict::detect_conflicts_with(&entries, options))
    }

    /// Resources passing `filter` at `now`, in roster order.
    pub fn resources_matching(&self, filter: ResourceFilter, now: DateTime<Utc>) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|resource| filter.matches(resource, now))
            .collect()
    }

    /// Hourly slots for one faculty member. Unknown ids yield no slots.
    pub fn available_slots(
        &self,
        faculty_id: &str,
        filter: AvailabilityFilter,
        reference: DateTime<Utc>,
        config: &AvailabilityConfig,
    ) -> Vec<AvailabilitySlot> {
        match self.faculty_member(faculty_id) {
            Some(member) => {
                availability::get_available_slots(&member.schedule, filter, reference, config)
            }
            None => Vec::new(),
        }
    }

    /// Apply a workload change and return the updated workload.
    pub fn update_workload(&mut self, update: &WorkloadUpdate) -> Result<&Workload> {
        let member = self
            .faculty
            .iter_mut()
            .find(|f| f.id == update.faculty_id)
            .ok_or_else(|| ScheduleError::FacultyNotFound(update.faculty_id.clone()))?;
        member.workload.set(update.field, update.value);
        Ok(&member.workload)
    }
}
