//! Detect overlapping entries that share an owner.
//!
//! Every pair of entries with the same [`OwnerKey`] is compared. Entries
//! without a valid interval or without any owner are dropped before the scan
//! and reported as [`Diagnostic`]s rather than failing the whole call.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::boundary::BoundaryPolicy;
use crate::entry::{OwnerKey, TimedEntry};
use crate::error::ScheduleError;
use crate::interval::TimeInterval;

/// Options for [`detect_conflicts_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictOptions {
    pub boundary: BoundaryPolicy,
}

/// Two entries with the same owner whose time ranges overlap.
///
/// `a` sorts no later than `b` by start time. `overlap_minutes` is `0` when
/// the entries only touch under [`BoundaryPolicy::Inclusive`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictPair {
    pub a: TimedEntry,
    pub b: TimedEntry,
    pub owner: OwnerKey,
    pub overlap_minutes: i64,
}

/// Why an entry was left out of the scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DropReason {
    InvalidInterval { message: String },
    MissingOwner,
}

/// An entry that was skipped, identified by its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub index: usize,
    pub entry_id: String,
    #[serde(flatten)]
    pub reason: DropReason,
}

/// Conflicts found plus the entries that could not take part.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConflictReport {
    pub conflicts: Vec<ConflictPair>,
    pub diagnostics: Vec<Diagnostic>,
}

struct Candidate<'a> {
    entry: &'a TimedEntry,
    interval: TimeInterval,
    owner: OwnerKey,
}

/// Find every conflicting pair using the default (inclusive) boundary policy.
///
/// Malformed or ownerless entries are silently dropped; use
/// [`detect_conflicts_with`] to see which.
pub fn detect_conflicts(entries: &[TimedEntry]) -> Vec<ConflictPair> {
    detect_conflicts_with(entries, &ConflictOptions::default()).conflicts
}

/// Find every conflicting pair and report dropped entries.
///
/// Entries are sorted by start time (stable, so ties keep input order), then
/// each unordered pair `(i, j)` with `i < j` is tested once. Pairs are
/// returned in discovery order: ascending `i`, then ascending `j`.
pub fn detect_conflicts_with(entries: &[TimedEntry], options: &ConflictOptions) -> ConflictReport {
    let mut diagnostics = Vec::new();
    let mut candidates: Vec<Candidate<'_>> = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let interval = match entry.interval() {
            Ok(interval) => interval,
            Err(err) => {
                debug!(index, id = entry.id(), error = %err, "dropping entry with invalid interval");
                diagnostics.push(Diagnostic {
                    index,
                    entry_id: entry.id().to_string(),
                    reason: invalid_interval(&err),
                });
                continue;
            }
        };
        let Some(owner) = entry.owner_key() else {
            debug!(index, id = entry.id(), "dropping entry without resource or faculty owner");
            diagnostics.push(Diagnostic {
                index,
                entry_id: entry.id().to_string(),
                reason: DropReason::MissingOwner,
            });
            continue;
        };
        candidates.push(Candidate {
            entry,
            interval,
            owner,
        });
    }

    candidates.sort_by_key(|c| c.interval.start());

    let mut conflicts = Vec::new();
    for (i, a) in candidates.iter().enumerate() {
        for b in &candidates[i + 1..] {
            if a.owner != b.owner {
                continue;
            }
            if a.interval.overlaps(&b.interval, options.boundary) {
                conflicts.push(ConflictPair {
                    a: a.entry.clone(),
                    b: b.entry.clone(),
                    owner: a.owner.clone(),
                    overlap_minutes: a.interval.overlap_minutes(&b.interval),
                });
            }
        }
    }

    ConflictReport {
        conflicts,
        diagnostics,
    }
}

fn invalid_interval(err: &ScheduleError) -> DropReason {
    DropReason::InvalidInterval {
        message: err.to_string(),
    }
}
