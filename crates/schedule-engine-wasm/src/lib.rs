//! WASM bindings for schedule-engine.
//!
//! Exposes conflict detection, availability slots and workload summaries to a
//! browser dashboard via `wasm-bindgen`. All complex types are passed as JSON
//! strings in the same camelCase shape the dashboard already uses.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p schedule-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/schedule_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use schedule_engine::{
    AvailabilityConfig, AvailabilityFilter, BoundaryPolicy, ConflictOptions, FacultyMember,
    ScheduleEntry, TimedEntry, WorkloadLimits, WorkloadSummary,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    instant: String,
    available: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset, e.g., "2026-03-17T14:00:00+00:00")
/// and naive time (e.g., "2026-03-17T14:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_json<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find conflicting pairs among schedule entries.
///
/// `entries_json` is a JSON array of entries tagged with `"source"`:
/// `"faculty"` (with `facultyId`), `"resource"` (with `resourceId`) or
/// `"external"`. `boundary` is `"inclusive"` (default) or `"half_open"`.
/// Returns a JSON object `{conflicts, diagnostics}`.
#[wasm_bindgen(js_name = "detectConflicts")]
pub fn detect_conflicts(entries_json: &str, boundary: Option<String>) -> Result<String, JsValue> {
    let entries: Vec<TimedEntry> = parse_json(entries_json, "entries")?;
    let boundary = match boundary.as_deref() {
        None => BoundaryPolicy::default(),
        Some(name) => BoundaryPolicy::from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown boundary policy: {}", name)))?,
    };

    let report = schedule_engine::detect_conflicts_with(&entries, &ConflictOptions { boundary });

    to_json(&report)
}

/// Compute hourly availability slots for one faculty member's schedule.
///
/// `entries_json` is a JSON array of schedule entries, `filter` is `day`,
/// `week` or `month`, `reference` an ISO 8601 datetime. `config_json`
/// optionally overrides working hours, days and timezone. Returns a JSON
/// array of `{instant, available}` objects.
#[wasm_bindgen(js_name = "getAvailableSlots")]
pub fn get_available_slots(
    entries_json: &str,
    filter: &str,
    reference: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let entries: Vec<ScheduleEntry> = parse_json(entries_json, "entries")?;
    let filter: AvailabilityFilter = filter
        .parse()
        .map_err(|e: schedule_engine::ScheduleError| JsValue::from_str(&e.to_string()))?;
    let reference = parse_datetime(reference)?;
    let config: AvailabilityConfig = match config_json.as_deref() {
        Some(json) => parse_json(json, "config")?,
        None => AvailabilityConfig::default(),
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let slots = schedule_engine::get_available_slots(&entries, filter, reference, &config);

    let dtos: Vec<SlotDto> = slots
        .iter()
        .map(|s| SlotDto {
            instant: s.instant.to_rfc3339(),
            available: s.available,
        })
        .collect();
    to_json(&dtos)
}

/// Summarize workload hours across faculty members.
///
/// `faculty_json` is a JSON array of faculty members; `limits_json`
/// optionally overrides the overbooked/underutilized thresholds.
#[wasm_bindgen(js_name = "summarizeWorkload")]
pub fn summarize_workload(faculty_json: &str, limits_json: Option<String>) -> Result<String, JsValue> {
    let faculty: Vec<FacultyMember> = parse_json(faculty_json, "faculty")?;
    let limits: WorkloadLimits = match limits_json.as_deref() {
        Some(json) => parse_json(json, "limits")?,
        None => WorkloadLimits::default(),
    };

    to_json(&WorkloadSummary::from_faculty(&faculty, &limits))
}
