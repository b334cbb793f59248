use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Lifecycle status of a vacation plan.
///
/// `Draft` is client-local: plans are persisted only once submission has
/// validated them, already at `DepartmentPending`. `Withdrawn` is the
/// rejection-equivalent terminal state for a staff-initiated withdrawal.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlanStatus {
    Draft,
    DepartmentPending,
    FacilityPending,
    WorkspacePending,
    Approved,
    Rejected,
    Withdrawn,
}

impl PlanStatus {
    /// The approval level an approver must hold to act on a plan in this
    /// status. `None` for states without an active approver.
    pub fn approval_level(self) -> Option<u8> {
        match self {
            PlanStatus::DepartmentPending => Some(1),
            PlanStatus::FacilityPending => Some(2),
            PlanStatus::WorkspacePending => Some(3),
            _ => None,
        }
    }

    /// Inverse of [`approval_level`](Self::approval_level).
    pub fn for_level(level: u8) -> Option<PlanStatus> {
        match level {
            1 => Some(PlanStatus::DepartmentPending),
            2 => Some(PlanStatus::FacilityPending),
            3 => Some(PlanStatus::WorkspacePending),
            _ => None,
        }
    }

    /// The pending status a plan advances to when the current level
    /// approves. `None` when approval at this status is final.
    pub fn next_pending(self) -> Option<PlanStatus> {
        match self {
            PlanStatus::DepartmentPending => Some(PlanStatus::FacilityPending),
            PlanStatus::FacilityPending => Some(PlanStatus::WorkspacePending),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PlanStatus::Approved | PlanStatus::Rejected | PlanStatus::Withdrawn
        )
    }

    pub fn is_pending(self) -> bool {
        self.approval_level().is_some()
    }

    /// Whether a plan in this status counts toward self-overlap and
    /// staffing-conflict checks.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            PlanStatus::DepartmentPending
                | PlanStatus::FacilityPending
                | PlanStatus::WorkspacePending
                | PlanStatus::Approved
        )
    }

    /// The closed transition table. Any edge not listed here is invalid.
    pub fn can_transition(self, to: PlanStatus) -> bool {
        use PlanStatus::*;
        matches!(
            (self, to),
            (Draft, DepartmentPending)
                | (DepartmentPending, FacilityPending)
                | (DepartmentPending, Rejected)
                | (DepartmentPending, Withdrawn)
                | (FacilityPending, WorkspacePending)
                | (FacilityPending, Rejected)
                | (FacilityPending, Withdrawn)
                | (WorkspacePending, Approved)
                | (WorkspacePending, Rejected)
                | (WorkspacePending, Withdrawn)
        )
    }
}

/// Status of a single approval record.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DecisionStatus {
    Pending,
    Approved,
    Rejected,
}

/// An approver's decision as submitted through the API.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_level_mapping_is_bijective() {
        for level in 1..=3 {
            let status = PlanStatus::for_level(level).unwrap();
            assert_eq!(status.approval_level(), Some(level));
        }
        assert_eq!(PlanStatus::for_level(0), None);
        assert_eq!(PlanStatus::for_level(4), None);
        assert_eq!(PlanStatus::Draft.approval_level(), None);
        assert_eq!(PlanStatus::Approved.approval_level(), None);
        assert_eq!(PlanStatus::Rejected.approval_level(), None);
        assert_eq!(PlanStatus::Withdrawn.approval_level(), None);
    }

    #[test]
    fn pending_chain_walks_all_three_levels() {
        assert_eq!(
            PlanStatus::DepartmentPending.next_pending(),
            Some(PlanStatus::FacilityPending)
        );
        assert_eq!(
            PlanStatus::FacilityPending.next_pending(),
            Some(PlanStatus::WorkspacePending)
        );
        assert_eq!(PlanStatus::WorkspacePending.next_pending(), None);
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        use PlanStatus::*;
        let all = [
            Draft,
            DepartmentPending,
            FacilityPending,
            WorkspacePending,
            Approved,
            Rejected,
            Withdrawn,
        ];
        for from in [Approved, Rejected, Withdrawn] {
            for to in all {
                assert!(!from.can_transition(to), "{from} -> {to} must be invalid");
            }
        }
    }

    #[test]
    fn transition_table_rejects_skipped_levels() {
        assert!(!PlanStatus::DepartmentPending.can_transition(PlanStatus::WorkspacePending));
        assert!(!PlanStatus::DepartmentPending.can_transition(PlanStatus::Approved));
        assert!(!PlanStatus::Draft.can_transition(PlanStatus::FacilityPending));
        assert!(!PlanStatus::FacilityPending.can_transition(PlanStatus::DepartmentPending));
    }

    #[test]
    fn withdrawn_is_inactive_like_rejected() {
        assert!(!PlanStatus::Withdrawn.is_active());
        assert!(!PlanStatus::Rejected.is_active());
        assert!(PlanStatus::Approved.is_active());
        assert!(PlanStatus::FacilityPending.is_active());
    }

    #[test]
    fn status_strings_round_trip() {
        assert_eq!(PlanStatus::DepartmentPending.to_string(), "department_pending");
        assert_eq!(
            "workspace_pending".parse::<PlanStatus>().unwrap(),
            PlanStatus::WorkspacePending
        );
        assert_eq!(DecisionStatus::Pending.to_string(), "pending");
        assert!("unknown".parse::<PlanStatus>().is_err());
    }
}
