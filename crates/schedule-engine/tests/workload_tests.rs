//! Tests for workload totals, limits and summaries.

use schedule_engine::{FacultyMember, Workload, WorkloadLimits, WorkloadStatus, WorkloadSummary};

fn member(id: &str, teaching: f64, lab: f64, meeting: f64) -> FacultyMember {
    FacultyMember {
        id: id.to_string(),
        name: id.to_string(),
        department: String::new(),
        email: String::new(),
        position: String::new(),
        workload: Workload {
            teaching_hours: teaching,
            lab_hours: lab,
            meeting_hours: meeting,
        },
        schedule: vec![],
    }
}

#[test]
fn default_limits_classify_totals() {
    let limits = WorkloadLimits::default();

    assert_eq!(limits.classify(&member("a", 16.0, 0.0, 8.0).workload), WorkloadStatus::Balanced);
    assert_eq!(limits.classify(&member("b", 14.0, 10.0, 5.0).workload), WorkloadStatus::Overbooked);
    assert_eq!(limits.classify(&member("c", 8.0, 4.0, 2.0).workload), WorkloadStatus::Underutilized);
    // Thresholds themselves are balanced.
    assert_eq!(limits.classify(&member("d", 25.0, 0.0, 0.0).workload), WorkloadStatus::Balanced);
    assert_eq!(limits.classify(&member("e", 15.0, 0.0, 0.0).workload), WorkloadStatus::Balanced);
}

#[test]
fn summary_totals_and_percentages() {
    let faculty = vec![
        member("f1", 12.0, 6.0, 4.0),
        member("f2", 16.0, 0.0, 8.0),
        member("f4", 14.0, 10.0, 5.0),
        member("f6", 5.0, 4.0, 2.0),
    ];

    let summary = WorkloadSummary::from_faculty(&faculty, &WorkloadLimits::default());

    assert_eq!(summary.faculty_count, 4);
    assert_eq!(summary.teaching_hours, 47.0);
    assert_eq!(summary.lab_hours, 20.0);
    assert_eq!(summary.meeting_hours, 19.0);
    assert_eq!(summary.total_hours, 86.0);
    // 47/86 = 54.65%, 20/86 = 23.26%, 19/86 = 22.09%
    assert_eq!(summary.teaching_percent, 55);
    assert_eq!(summary.lab_percent, 23);
    assert_eq!(summary.meeting_percent, 22);
    assert_eq!(summary.overbooked, 1);
    assert_eq!(summary.underutilized, 1);
}

#[test]
fn empty_faculty_summary_is_zero() {
    let summary = WorkloadSummary::from_faculty(&[], &WorkloadLimits::default());
    assert_eq!(summary, WorkloadSummary::default());
}
