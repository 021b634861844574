//! Weekly workload hours and department-wide summaries.

use serde::{Deserialize, Serialize};

use crate::roster::FacultyMember;

/// Weekly hours per activity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workload {
    pub teaching_hours: f64,
    pub lab_hours: f64,
    pub meeting_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkloadField {
    TeachingHours,
    LabHours,
    MeetingHours,
}

impl Workload {
    pub fn total(&self) -> f64 {
        self.teaching_hours + self.lab_hours + self.meeting_hours
    }

    pub fn set(&mut self, field: WorkloadField, value: f64) {
        match field {
            WorkloadField::TeachingHours => self.teaching_hours = value,
            WorkloadField::LabHours => self.lab_hours = value,
            WorkloadField::MeetingHours => self.meeting_hours = value,
        }
    }
}

/// Thresholds on total weekly hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadLimits {
    /// Totals strictly above this are overbooked.
    pub overbooked_above: f64,
    /// Totals strictly below this are underutilized.
    pub underutilized_below: f64,
}

impl Default for WorkloadLimits {
    fn default() -> Self {
        Self {
            overbooked_above: 25.0,
            underutilized_below: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadStatus {
    Underutilized,
    Balanced,
    Overbooked,
}

impl WorkloadLimits {
    pub fn classify(&self, workload: &Workload) -> WorkloadStatus {
        let total = workload.total();
        if total > self.overbooked_above {
            WorkloadStatus::Overbooked
        } else if total < self.underutilized_below {
            WorkloadStatus::Underutilized
        } else {
            WorkloadStatus::Balanced
        }
    }
}

/// Totals and rounded percentage split across a set of faculty members.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkloadSummary {
    pub faculty_count: usize,
    pub teaching_hours: f64,
    pub lab_hours: f64,
    pub meeting_hours: f64,
    pub total_hours: f64,
    pub teaching_percent: u32,
    pub lab_percent: u32,
    pub meeting_percent: u32,
    pub overbooked: usize,
    pub underutilized: usize,
}

impl WorkloadSummary {
    pub fn from_faculty(faculty: &[FacultyMember], limits: &WorkloadLimits) -> Self {
        let mut summary = faculty.iter().fold(Self::default(), |mut acc, member| {
            acc.teaching_hours += member.workload.teaching_hours;
            acc.lab_hours += member.workload.lab_hours;
            acc.meeting_hours += member.workload.meeting_hours;
            match limits.classify(&member.workload) {
                WorkloadStatus::Overbooked => acc.overbooked += 1,
                WorkloadStatus::Underutilized => acc.underutilized += 1,
                WorkloadStatus::Balanced => {}
            }
            acc
        });
        summary.faculty_count = faculty.len();
        summary.total_hours = summary.teaching_hours + summary.lab_hours + summary.meeting_hours;
        summary.teaching_percent = percent(summary.teaching_hours, summary.total_hours);
        summary.lab_percent = percent(summary.lab_hours, summary.total_hours);
        summary.meeting_percent = percent(summary.meeting_hours, summary.total_hours);
        summary
    }
}

fn percent(part: f64, total: f64) -> u32 {
    if total <= 0.0 {
        return 0;
    }
    (part / total * 100.0).round() as u32
}
