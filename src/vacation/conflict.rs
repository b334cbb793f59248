use std::collections::BTreeSet;

use serde::Serialize;
use utoipa::ToSchema;

use crate::vacation::split::DateRange;

/// Staffing numbers for one department, as resolved by the directory.
#[derive(Debug, Copy, Clone)]
pub struct DepartmentStaffing {
    /// Minimum staff that must remain on duty on any given day.
    pub min_staff: u32,
    /// Total staff assigned to the department.
    pub total_staff: u32,
}

/// Another plan in the same department that is still in play (pending at any
/// level, or approved).
#[derive(Debug, Clone)]
pub struct ActivePlan {
    pub plan_id: u64,
    pub staff_id: u64,
    pub splits: Vec<DateRange>,
}

/// Advisory outcome of a staffing check. Never blocks an approval; it is
/// recorded on the approval record and surfaced to the next approver.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ConflictReport {
    #[schema(example = true)]
    pub has_conflict: bool,
    #[schema(example = "3 of 4 staff would be absent on 2026-07-10 (minimum 3 on duty)")]
    pub conflict_reason: Option<String>,
    #[schema(example = json!([17, 21, 35]))]
    pub conflicting_plans: Vec<u64>,
}

impl ConflictReport {
    pub fn clear() -> Self {
        ConflictReport {
            has_conflict: false,
            conflict_reason: None,
            conflicting_plans: Vec::new(),
        }
    }
}

/// Detect whether taking `proposed` days off would breach the department's
/// staffing minimum, given every other active plan in the department.
///
/// Pure and deterministic over its inputs; callers re-run it at every
/// approval level rather than reusing an earlier result, since competing
/// plans change between levels. `others` must already exclude the plan under
/// consideration; plans belonging to `requester_id` count toward that one
/// staff member, never twice.
pub fn detect(
    staffing: &DepartmentStaffing,
    requester_id: u64,
    proposed: &[DateRange],
    others: &[ActivePlan],
) -> ConflictReport {
    let mut reason: Option<String> = None;
    // BTreeSet keeps conflicting plan ids distinct and deterministically ordered.
    let mut conflicting: BTreeSet<u64> = BTreeSet::new();

    for split in proposed {
        for day in split.days() {
            let mut absent_staff: BTreeSet<u64> = BTreeSet::new();
            absent_staff.insert(requester_id);
            let mut day_plans: Vec<u64> = Vec::new();

            for plan in others {
                if plan.splits.iter().any(|s| s.contains(day)) {
                    absent_staff.insert(plan.staff_id);
                    day_plans.push(plan.plan_id);
                }
            }

            let absent = absent_staff.len() as u32;
            let present = staffing.total_staff.saturating_sub(absent);
            if present < staffing.min_staff {
                if reason.is_none() {
                    reason = Some(format!(
                        "{absent} of {} staff would be absent on {day} (minimum {} on duty)",
                        staffing.total_staff, staffing.min_staff
                    ));
                }
                conflicting.extend(day_plans);
            }
        }
    }

    ConflictReport {
        has_conflict: reason.is_some(),
        conflict_reason: reason,
        conflicting_plans: conflicting.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn r(start: &str, end: &str) -> DateRange {
        DateRange::new(
            start.parse::<NaiveDate>().unwrap(),
            end.parse::<NaiveDate>().unwrap(),
        )
    }

    fn plan(plan_id: u64, staff_id: u64, splits: &[DateRange]) -> ActivePlan {
        ActivePlan {
            plan_id,
            staff_id,
            splits: splits.to_vec(),
        }
    }

    // Min staffing 3 of 4; one person away leaves 3 on duty.
    #[test]
    fn lone_absence_above_minimum_is_clear() {
        let staffing = DepartmentStaffing {
            min_staff: 3,
            total_staff: 4,
        };
        let report = detect(&staffing, 100, &[r("2026-07-10", "2026-07-12")], &[]);
        assert!(!report.has_conflict);
        assert_eq!(report.conflict_reason, None);
        assert!(report.conflicting_plans.is_empty());
    }

    // Three colleagues already off on the requested day: 4 of 4 absent.
    #[test]
    fn full_department_absence_flags_every_contributing_plan() {
        let staffing = DepartmentStaffing {
            min_staff: 3,
            total_staff: 4,
        };
        let others = [
            plan(11, 201, &[r("2026-07-09", "2026-07-11")]),
            plan(12, 202, &[r("2026-07-10", "2026-07-10")]),
            plan(13, 203, &[r("2026-07-08", "2026-07-15")]),
        ];
        let report = detect(&staffing, 100, &[r("2026-07-10", "2026-07-10")], &others);
        assert!(report.has_conflict);
        assert_eq!(report.conflicting_plans, vec![11, 12, 13]);
        let reason = report.conflict_reason.unwrap();
        assert!(reason.contains("4 of 4"), "unexpected reason: {reason}");
        assert!(reason.contains("2026-07-10"), "unexpected reason: {reason}");
    }

    #[test]
    fn requesters_other_plans_do_not_double_count_the_requester() {
        let staffing = DepartmentStaffing {
            min_staff: 3,
            total_staff: 4,
        };
        // Another plan of the requester on the same day: still one absent person.
        let others = [plan(11, 100, &[r("2026-07-10", "2026-07-10")])];
        let report = detect(&staffing, 100, &[r("2026-07-10", "2026-07-10")], &others);
        assert!(!report.has_conflict);
    }

    #[test]
    fn only_plans_touching_flagged_days_are_reported() {
        let staffing = DepartmentStaffing {
            min_staff: 1,
            total_staff: 3,
        };
        let others = [
            plan(21, 301, &[r("2026-07-10", "2026-07-10")]),
            plan(23, 303, &[r("2026-07-10", "2026-07-10")]),
            // Overlaps the request but never on a day below minimum.
            plan(22, 302, &[r("2026-07-14", "2026-07-14")]),
        ];
        let report = detect(&staffing, 100, &[r("2026-07-10", "2026-07-14")], &others);
        assert!(report.has_conflict);
        assert_eq!(report.conflicting_plans, vec![21, 23]);
    }

    // Adding one more overlapping plan can only keep or raise the absence
    // count, never clear a conflict.
    #[test]
    fn detection_is_monotonic_in_headcount() {
        let staffing = DepartmentStaffing {
            min_staff: 3,
            total_staff: 4,
        };
        let proposed = [r("2026-07-10", "2026-07-12")];
        let mut others = vec![plan(31, 401, &[r("2026-07-11", "2026-07-11")])];
        let before = detect(&staffing, 100, &proposed, &others);
        assert!(before.has_conflict);

        others.push(plan(32, 402, &[r("2026-07-12", "2026-07-12")]));
        let after = detect(&staffing, 100, &proposed, &others);
        assert!(after.has_conflict);
        assert!(after.conflicting_plans.len() >= before.conflicting_plans.len());
    }

    #[test]
    fn detection_is_idempotent_over_unchanged_inputs() {
        let staffing = DepartmentStaffing {
            min_staff: 2,
            total_staff: 3,
        };
        let proposed = [r("2026-07-01", "2026-07-07")];
        let others = [
            plan(41, 501, &[r("2026-07-03", "2026-07-05")]),
            plan(42, 502, &[r("2026-07-04", "2026-07-04")]),
        ];
        let first = detect(&staffing, 100, &proposed, &others);
        let second = detect(&staffing, 100, &proposed, &others);
        assert_eq!(first, second);
    }
}
