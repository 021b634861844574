//! `faculty-schedule` CLI: conflicts, availability, workload and occupancy
//! reports over a roster JSON file.
//!
//! ## Usage
//!
//! ```sh
//! # Conflicting entries across faculty schedules and room bookings
//! faculty-schedule conflicts -i roster.json
//!
//! # Treat back-to-back bookings as non-conflicting, and merge calendar events
//! faculty-schedule conflicts -i roster.json --half-open --calendar events.json
//!
//! # Hourly availability for one faculty member this week
//! faculty-schedule availability -i roster.json --faculty f1 --filter week
//!
//! # Workload totals and room occupancy at a given instant
//! faculty-schedule workload -i roster.json
//! faculty-schedule occupancy -i roster.json --at 2026-03-17T10:00:00Z
//! faculty-schedule rooms -i roster.json --filter available
//!
//! # Custom working hours, timezone and thresholds
//! faculty-schedule --config schedule.toml availability -i roster.json --faculty f1
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use schedule_engine::availability::free_slots;
use schedule_engine::{
    next_available_time, resource_status, sync_roster, AvailabilityFilter, BoundaryPolicy,
    DevelopmentGateway, EngineConfig, ExternalEvent, OccupancySummary, ResourceFilter,
    ResourceKind, ResourceStatus, Roster, TimeInterval, WorkloadSummary,
};
use serde::Serialize;
use std::io::{self, Read};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "faculty-schedule",
    version,
    about = "Faculty schedule conflicts, availability and workload"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file with working hours, conflict policy and workload limits
    #[arg(long, global = true)]
    config: Option<String>,

    /// Enable debug logging (written to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report overlapping entries that share a faculty member or room
    Conflicts {
        /// Roster JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Entries that only touch at an endpoint do not conflict
        #[arg(long)]
        half_open: bool,
        /// JSON array of external calendar events to include in the scan
        #[arg(long)]
        calendar: Option<String>,
    },
    /// List hourly available/busy slots for one faculty member
    Availability {
        /// Roster JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Faculty member id
        #[arg(long)]
        faculty: String,
        /// Window to cover: day, week or month
        #[arg(long, default_value = "day")]
        filter: AvailabilityFilter,
        /// Reference instant (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        /// Only print available slots
        #[arg(long)]
        free_only: bool,
    },
    /// Summarize workload hours across all faculty
    Workload {
        /// Roster JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Summarize room and lab occupancy at an instant
    Occupancy {
        /// Roster JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Instant to evaluate (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// List rooms and labs with their status at an instant
    Rooms {
        /// Roster JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// all, classroom, lab, available or occupied
        #[arg(long, default_value = "all")]
        filter: ResourceFilter,
        /// Instant to evaluate (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Push every faculty entry to the development calendar and report the result
    Sync {
        /// Roster JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Conflicts {
            input,
            output,
            half_open,
            calendar,
        } => {
            let roster = read_roster(input.as_deref())?;
            let mut options = config.conflicts;
            if half_open {
                options.boundary = BoundaryPolicy::HalfOpen;
            }

            let report = match calendar {
                Some(path) => {
                    let events: Vec<ExternalEvent> = serde_json::from_str(&read_input(Some(&path))?)
                        .with_context(|| format!("Failed to parse calendar events: {}", path))?;
                    let gateway = DevelopmentGateway::new(events);
                    let everything = TimeInterval::new(DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC)
                        .context("Failed to build calendar window")?;
                    roster
                        .detect_conflicts_with_calendar(&gateway, &everything, &options)
                        .context("Failed to fetch calendar events")?
                }
                None => roster.detect_conflicts(&options),
            };

            for diagnostic in &report.diagnostics {
                warn!(
                    index = diagnostic.index,
                    id = %diagnostic.entry_id,
                    reason = ?diagnostic.reason,
                    "entry skipped"
                );
            }
            info!(conflicts = report.conflicts.len(), "conflict scan complete");
            write_json(output.as_deref(), &report)?;
        }
        Commands::Availability {
            input,
            output,
            faculty,
            filter,
            at,
            free_only,
        } => {
            let roster = read_roster(input.as_deref())?;
            let reference = at.unwrap_or_else(Utc::now);
            if roster.faculty_member(&faculty).is_none() {
                warn!(faculty = %faculty, "unknown faculty member, no slots");
            }

            let slots = roster.available_slots(&faculty, filter, reference, &config.availability);
            let slots = if free_only { free_slots(&slots) } else { slots };

            debug!(faculty = %faculty, %filter, slots = slots.len(), "availability computed");
            write_json(output.as_deref(), &slots)?;
        }
        Commands::Workload { input, output } => {
            let roster = read_roster(input.as_deref())?;
            let summary = WorkloadSummary::from_faculty(&roster.faculty, &config.workload);
            write_json(output.as_deref(), &summary)?;
        }
        Commands::Occupancy { input, output, at } => {
            let roster = read_roster(input.as_deref())?;
            let now = at.unwrap_or_else(Utc::now);
            let summary = OccupancySummary::at(&roster.resources, now);
            write_json(output.as_deref(), &summary)?;
        }
        Commands::Rooms {
            input,
            output,
            filter,
            at,
        } => {
            let roster = read_roster(input.as_deref())?;
            let now = at.unwrap_or_else(Utc::now);
            let rooms: Vec<RoomStatus<'_>> = roster
                .resources_matching(filter, now)
                .into_iter()
                .map(|resource| RoomStatus {
                    id: &resource.id,
                    name: &resource.name,
                    kind: resource.kind,
                    status: resource_status(&resource.schedule, now),
                    next_available: next_available_time(resource, now),
                })
                .collect();
            debug!(?filter, rooms = rooms.len(), "rooms listed");
            write_json(output.as_deref(), &rooms)?;
        }
        Commands::Sync { input, output } => {
            let roster = read_roster(input.as_deref())?;
            let mut gateway = DevelopmentGateway::new(Vec::new());
            let report = sync_roster(&mut gateway, &roster);
            info!(
                pushed = report.pushed.len(),
                failed = report.failed.len(),
                "sync complete"
            );
            write_json(output.as_deref(), &report)?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct RoomStatus<'a> {
    id: &'a str,
    name: &'a str,
    kind: ResourceKind,
    status: ResourceStatus,
    next_available: Option<DateTime<Utc>>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path))?;
            EngineConfig::from_toml_str(&raw).with_context(|| format!("Invalid config: {}", path))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn read_roster(path: Option<&str>) -> Result<Roster> {
    let raw = read_input(path)?;
    Roster::from_json_str(&raw).context("Failed to parse roster JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
