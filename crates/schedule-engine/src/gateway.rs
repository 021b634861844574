//! The seam to an external calendar service.
//!
//! The engine never talks to a calendar itself. Callers pass a
//! [`CalendarGateway`] into the operations that need one. [`DevelopmentGateway`]
//! keeps everything in memory and serves the events it was seeded with.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::boundary::BoundaryPolicy;
use crate::entry::{ExternalEvent, ScheduleEntry};
use crate::error::{Result, ScheduleError};
use crate::interval::TimeInterval;
use crate::roster::Roster;

pub trait CalendarGateway {
    fn is_connected(&self) -> bool;

    /// Events whose range intersects `window`, including events that only
    /// touch one of its ends. The caller's boundary policy decides whether
    /// those count as conflicts.
    fn fetch_events(&self, window: &TimeInterval) -> Result<Vec<ExternalEvent>>;

    /// Publish a faculty schedule entry and return the calendar's event id.
    fn push_entry(&mut self, faculty_id: &str, entry: &ScheduleEntry) -> Result<String>;

    fn set_reminder(&mut self, event_id: &str, minutes_before: u32) -> Result<()>;
}

/// In-memory gateway used in development and tests.
#[derive(Debug, Default)]
pub struct DevelopmentGateway {
    connected: bool,
    events: Vec<ExternalEvent>,
    reminders: HashMap<String, u32>,
    next_id: u64,
}

impl DevelopmentGateway {
    /// A connected gateway serving `events`.
    pub fn new(events: Vec<ExternalEvent>) -> Self {
        Self {
            connected: true,
            events,
            ..Self::default()
        }
    }

    /// A gateway that refuses every operation.
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connect(&mut self) {
        self.connected = true;
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn events(&self) -> &[ExternalEvent] {
        &self.events
    }

    pub fn reminder(&self, event_id: &str) -> Option<u32> {
        self.reminders.get(event_id).copied()
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(ScheduleError::Gateway("calendar is not connected".to_string()))
        }
    }
}

impl CalendarGateway for DevelopmentGateway {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn fetch_events(&self, window: &TimeInterval) -> Result<Vec<ExternalEvent>> {
        self.ensure_connected()?;
        Ok(self
            .events
            .iter()
            .filter(|event| {
                TimeInterval::with_default_end(event.start, event.end)
                    .map(|interval| interval.overlaps(window, BoundaryPolicy::Inclusive))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    fn push_entry(&mut self, faculty_id: &str, entry: &ScheduleEntry) -> Result<String> {
        self.ensure_connected()?;
        let interval = entry.interval()?;
        self.next_id += 1;
        let id = format!("dev-{}", self.next_id);
        debug!(%id, faculty_id, title = %entry.title, "pushed entry to development calendar");
        self.events.push(ExternalEvent {
            id: id.clone(),
            title: entry.title.clone(),
            start: interval.start(),
            end: Some(interval.end()),
            faculty_id: Some(faculty_id.to_string()),
            resource_id: None,
        });
        Ok(id)
    }

    fn set_reminder(&mut self, event_id: &str, minutes_before: u32) -> Result<()> {
        self.ensure_connected()?;
        if !self.events.iter().any(|e| e.id == event_id) {
            return Err(ScheduleError::Gateway(format!("unknown event: {}", event_id)));
        }
        self.reminders.insert(event_id.to_string(), minutes_before);
        Ok(())
    }
}

/// Outcome of pushing a roster to a calendar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub pushed: Vec<String>,
    pub failed: Vec<SyncFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncFailure {
    pub faculty_id: String,
    pub entry_id: String,
    pub error: String,
}

/// Push every faculty entry, continuing past individual failures.
pub fn sync_roster(gateway: &mut dyn CalendarGateway, roster: &Roster) -> SyncReport {
    let mut report = SyncReport::default();
    for member in &roster.faculty {
        for entry in &member.schedule {
            match gateway.push_entry(&member.id, entry) {
                Ok(event_id) => report.pushed.push(event_id),
                Err(err) => {
                    warn!(faculty_id = %member.id, entry_id = %entry.id, error = %err, "failed to sync entry");
                    report.failed.push(SyncFailure {
                        faculty_id: member.id.clone(),
                        entry_id: entry.id.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
    }
    report
}
