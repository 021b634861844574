//! # schedule-engine
//!
//! Conflict detection and working-hours availability for faculty and room
//! schedules.
//!
//! The engine is a set of pure functions over in-memory snapshots. It never
//! mutates its inputs and keeps no state between calls, so hosts can re-run it
//! on every change to their data.
//!
//! ## Modules
//!
//! - [`interval`]: validated time intervals and the overlap test
//! - [`boundary`]: whether touching intervals overlap
//! - [`entry`]: schedule entries, resource bookings, external events, owner keys
//! - [`conflict`]: pairwise overlap scan among entries sharing an owner
//! - [`availability`]: hourly available/busy slots within working hours
//! - [`roster`]: faculty and rooms, and the queries run over them
//! - [`workload`]: weekly hour totals and overbooked/underutilized limits
//! - [`occupancy`]: room status at an instant and usage summaries
//! - [`gateway`]: the external calendar seam
//! - [`config`]: TOML configuration
//! - [`error`]: Error types

pub mod availability;
pub mod boundary;
pub mod config;
pub mod conflict;
pub mod entry;
pub mod error;
pub mod gateway;
pub mod interval;
pub mod occupancy;
pub mod roster;
pub mod workload;

pub use availability::{
    get_available_slots, AvailabilityConfig, AvailabilityFilter, AvailabilitySlot,
};
pub use boundary::BoundaryPolicy;
pub use config::EngineConfig;
pub use conflict::{
    detect_conflicts, detect_conflicts_with, ConflictOptions, ConflictPair, ConflictReport,
    Diagnostic, DropReason,
};
pub use entry::{
    BookingKind, EntryKind, ExternalEvent, OwnerKey, ResourceBooking, ScheduleEntry, TimedEntry,
};
pub use error::ScheduleError;
pub use gateway::{sync_roster, CalendarGateway, DevelopmentGateway, SyncReport};
pub use interval::TimeInterval;
pub use occupancy::{
    next_available_time, resource_status, OccupancySummary, ResourceFilter, ResourceStatus,
};
pub use roster::{FacultyMember, Resource, ResourceKind, Roster, WorkloadUpdate};
pub use workload::{Workload, WorkloadLimits, WorkloadStatus, WorkloadSummary};
