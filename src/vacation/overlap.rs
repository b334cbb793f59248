use crate::vacation::error::VacationError;
use crate::vacation::split::DateRange;

/// Self-overlap validation: one staff member must never hold two active
/// vacation plans with intersecting dates.
///
/// `existing` is the union of the staff member's splits across their own
/// active plans (pending at any level, or approved), with the plan being
/// edited already excluded by the caller. Independent of department
/// headcount.
pub fn check_self_overlap(
    proposed: &[DateRange],
    existing: &[DateRange],
) -> Result<(), VacationError> {
    for candidate in proposed {
        for held in existing {
            if candidate.overlaps(held) {
                return Err(VacationError::OverlapConflict {
                    start: held.start_date,
                    end: held.end_date,
                });
            }
        }
    }
    Ok(())
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

    #[test]
    fn passes_with_no_existing_plans() {
        assert!(check_self_overlap(&[r("2026-07-01", "2026-07-05")], &[]).is_ok());
    }

    #[test]
    fn passes_when_ranges_are_disjoint() {
        let existing = [r("2026-06-01", "2026-06-10"), r("2026-08-01", "2026-08-05")];
        assert!(check_self_overlap(&[r("2026-07-01", "2026-07-05")], &existing).is_ok());
    }

    // A split of 2026-07-01..2026-07-05 against an already-approved
    // 2026-07-03..2026-07-04 must be refused.
    #[test]
    fn rejects_overlap_with_held_vacation() {
        let existing = [r("2026-07-03", "2026-07-04")];
        let err = check_self_overlap(&[r("2026-07-01", "2026-07-05")], &existing).unwrap_err();
        match err {
            VacationError::OverlapConflict { start, end } => {
                assert_eq!(start, "2026-07-03".parse().unwrap());
                assert_eq!(end, "2026-07-04".parse().unwrap());
            }
            other => panic!("expected OverlapConflict, got {other:?}"),
        }
    }

    #[test]
    fn rejects_single_shared_day() {
        let existing = [r("2026-07-05", "2026-07-10")];
        assert!(check_self_overlap(&[r("2026-07-01", "2026-07-05")], &existing).is_err());
    }
}
