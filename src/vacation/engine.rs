//! Pure transition logic of the approval state machine.
//!
//! These functions validate a proposed submit/decide/withdraw against the
//! current plan state and return what must change. The callers own all I/O
//! and commit every status change with a conditional update keyed on the
//! expected current status, so a concurrent second writer observes zero
//! affected rows and surfaces [`VacationError::StaleTransition`].

use crate::vacation::error::VacationError;
use crate::vacation::overlap::check_self_overlap;
use crate::vacation::split::{DateRange, validate_splits};
use crate::vacation::status::{Decision, PlanStatus};

/// Constraints a plan's vacation type imposes on submission.
#[derive(Debug, Copy, Clone)]
pub struct VacationTypeRules {
    pub max_days: i64,
    pub requires_documentation: bool,
}

/// Validate a submission and return the plan's computed total day count.
///
/// `existing_splits` are the staff member's own splits across their active
/// plans. A valid submission leaves `Draft` for `DepartmentPending`.
pub fn validate_submit(
    splits: &[DateRange],
    rules: &VacationTypeRules,
    max_splits: usize,
    documentation_note: Option<&str>,
    existing_splits: &[DateRange],
) -> Result<i64, VacationError> {
    let total_days = validate_splits(splits, max_splits)?;

    if total_days > rules.max_days {
        return Err(VacationError::validation(format!(
            "requested {total_days} days, but this vacation type allows at most {} days",
            rules.max_days
        )));
    }

    if rules.requires_documentation
        && documentation_note.map_or(true, |note| note.trim().is_empty())
    {
        return Err(VacationError::validation(
            "this vacation type requires supporting documentation",
        ));
    }

    check_self_overlap(splits, existing_splits)?;

    Ok(total_days)
}

/// Require that `level` is exactly the plan's current approval level.
///
/// This is the optimistic-concurrency precondition: a decision against any
/// other status means the plan moved underneath the caller, who must reload.
pub fn validate_decide(current: PlanStatus, level: u8) -> Result<(), VacationError> {
    let expected = PlanStatus::for_level(level).ok_or_else(|| {
        VacationError::validation(format!("approval level {level} does not exist"))
    })?;
    if current != expected {
        return Err(VacationError::StaleTransition);
    }
    Ok(())
}

/// Require that the caller is the directory-resolved approver for the level.
pub fn authorize_approver(resolved: u64, approver_id: u64) -> Result<(), VacationError> {
    if resolved != approver_id {
        return Err(VacationError::Unauthorized);
    }
    Ok(())
}

/// What a committed decision does to the plan.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Advance {
    /// Plan moves to the next pending status; a fresh approval row is
    /// created at `level`.
    Next { status: PlanStatus, level: u8 },
    /// Plan reached `Approved` or `Rejected`; no further approval rows.
    Terminal(PlanStatus),
}

impl Advance {
    pub fn status(self) -> PlanStatus {
        match self {
            Advance::Next { status, .. } => status,
            Advance::Terminal(status) => status,
        }
    }
}

/// Resolve the outcome of a decision at the plan's current status.
pub fn apply_decision(current: PlanStatus, decision: Decision) -> Result<Advance, VacationError> {
    if current.approval_level().is_none() {
        return Err(VacationError::StaleTransition);
    }

    let advance = match decision {
        Decision::Reject => Advance::Terminal(PlanStatus::Rejected),
        Decision::Approve => match current.next_pending() {
            Some(next) => Advance::Next {
                status: next,
                // next_pending always yields a pending status
                level: next.approval_level().unwrap_or(0),
            },
            None => Advance::Terminal(PlanStatus::Approved),
        },
    };

    if !current.can_transition(advance.status()) {
        return Err(VacationError::StaleTransition);
    }
    Ok(advance)
}

/// A plan may be withdrawn by its owner while pending at any level.
pub fn validate_withdraw(current: PlanStatus) -> Result<(), VacationError> {
    if !current.can_transition(PlanStatus::Withdrawn) {
        return Err(VacationError::StaleTransition);
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

    fn rules(max_days: i64) -> VacationTypeRules {
        VacationTypeRules {
            max_days,
            requires_documentation: false,
        }
    }

    #[test]
    fn submit_accepts_a_clean_plan() {
        let total = validate_submit(
            &[r("2026-07-01", "2026-07-05"), r("2026-09-01", "2026-09-02")],
            &rules(25),
            6,
            None,
            &[],
        )
        .unwrap();
        assert_eq!(total, 7);
    }

    #[test]
    fn submit_rejects_exceeding_the_type_maximum() {
        let err = validate_submit(&[r("2026-07-01", "2026-07-31")], &rules(20), 6, None, &[])
            .unwrap_err();
        assert!(matches!(err, VacationError::Validation(_)));
    }

    #[test]
    fn submit_requires_documentation_when_the_type_demands_it() {
        let demanding = VacationTypeRules {
            max_days: 25,
            requires_documentation: true,
        };
        let splits = [r("2026-07-01", "2026-07-02")];
        assert!(validate_submit(&splits, &demanding, 6, None, &[]).is_err());
        assert!(validate_submit(&splits, &demanding, 6, Some("  "), &[]).is_err());
        assert!(validate_submit(&splits, &demanding, 6, Some("medical certificate"), &[]).is_ok());
    }

    // Submitting 2026-07-01..05 while holding an approved 2026-07-03..04.
    #[test]
    fn submit_rejects_self_overlap_with_held_plan() {
        let err = validate_submit(
            &[r("2026-07-01", "2026-07-05")],
            &rules(25),
            6,
            None,
            &[r("2026-07-03", "2026-07-04")],
        )
        .unwrap_err();
        assert!(matches!(err, VacationError::OverlapConflict { .. }));
    }

    #[test]
    fn decide_requires_status_to_match_level_exactly() {
        assert!(validate_decide(PlanStatus::FacilityPending, 2).is_ok());
        assert_eq!(
            validate_decide(PlanStatus::FacilityPending, 1).unwrap_err(),
            VacationError::StaleTransition
        );
        assert_eq!(
            validate_decide(PlanStatus::Approved, 3).unwrap_err(),
            VacationError::StaleTransition
        );
        assert!(matches!(
            validate_decide(PlanStatus::FacilityPending, 9).unwrap_err(),
            VacationError::Validation(_)
        ));
    }

    #[test]
    fn wrong_approver_is_unauthorized() {
        assert!(authorize_approver(42, 42).is_ok());
        assert_eq!(
            authorize_approver(42, 43).unwrap_err(),
            VacationError::Unauthorized
        );
    }

    // Facility approval advances to workspace review at level 3.
    #[test]
    fn facility_approval_advances_to_workspace_level() {
        let advance = apply_decision(PlanStatus::FacilityPending, Decision::Approve).unwrap();
        assert_eq!(
            advance,
            Advance::Next {
                status: PlanStatus::WorkspacePending,
                level: 3,
            }
        );
    }

    #[test]
    fn workspace_approval_is_terminal() {
        let advance = apply_decision(PlanStatus::WorkspacePending, Decision::Approve).unwrap();
        assert_eq!(advance, Advance::Terminal(PlanStatus::Approved));
    }

    // Department-level rejection terminates the plan immediately.
    #[test]
    fn rejection_is_terminal_at_any_level() {
        for status in [
            PlanStatus::DepartmentPending,
            PlanStatus::FacilityPending,
            PlanStatus::WorkspacePending,
        ] {
            let advance = apply_decision(status, Decision::Reject).unwrap();
            assert_eq!(advance, Advance::Terminal(PlanStatus::Rejected));
        }
    }

    #[test]
    fn deciding_a_terminal_plan_is_stale() {
        for status in [PlanStatus::Approved, PlanStatus::Rejected, PlanStatus::Withdrawn] {
            assert_eq!(
                apply_decision(status, Decision::Approve).unwrap_err(),
                VacationError::StaleTransition
            );
        }
    }

    #[test]
    fn withdraw_is_allowed_only_while_pending() {
        assert!(validate_withdraw(PlanStatus::DepartmentPending).is_ok());
        assert!(validate_withdraw(PlanStatus::WorkspacePending).is_ok());
        assert_eq!(
            validate_withdraw(PlanStatus::Approved).unwrap_err(),
            VacationError::StaleTransition
        );
        assert_eq!(
            validate_withdraw(PlanStatus::Withdrawn).unwrap_err(),
            VacationError::StaleTransition
        );
    }
}
