use strum_macros::Display;

use crate::vacation::error::VacationError;

/// The single responsible approver role per escalation level.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ApproverRole {
    DepartmentHead,
    FacilitySupervisor,
    WorkplaceSupervisor,
}

impl ApproverRole {
    pub fn for_level(level: u8) -> Option<ApproverRole> {
        match level {
            1 => Some(ApproverRole::DepartmentHead),
            2 => Some(ApproverRole::FacilitySupervisor),
            3 => Some(ApproverRole::WorkplaceSupervisor),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            ApproverRole::DepartmentHead => 1,
            ApproverRole::FacilitySupervisor => 2,
            ApproverRole::WorkplaceSupervisor => 3,
        }
    }
}

/// Turn a directory lookup result into the routed approver.
///
/// A missing role holder is a configuration fault: the plan stays where it
/// is and the gap is surfaced to administrators, never silently skipped.
pub fn require_approver(
    level: u8,
    resolved: Option<u64>,
    department_id: u64,
) -> Result<u64, VacationError> {
    let role = ApproverRole::for_level(level).ok_or_else(|| {
        VacationError::validation(format!("approval level {level} does not exist"))
    })?;
    resolved.ok_or(VacationError::NoApproverAssigned {
        role,
        department_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_roles_and_back() {
        assert_eq!(
            ApproverRole::for_level(1),
            Some(ApproverRole::DepartmentHead)
        );
        assert_eq!(
            ApproverRole::for_level(2),
            Some(ApproverRole::FacilitySupervisor)
        );
        assert_eq!(
            ApproverRole::for_level(3),
            Some(ApproverRole::WorkplaceSupervisor)
        );
        assert_eq!(ApproverRole::for_level(4), None);
        for level in 1..=3 {
            assert_eq!(ApproverRole::for_level(level).unwrap().level(), level);
        }
    }

    #[test]
    fn resolved_approver_is_passed_through() {
        assert_eq!(require_approver(2, Some(42), 7).unwrap(), 42);
    }

    #[test]
    fn missing_role_holder_is_a_configuration_fault() {
        let err = require_approver(3, None, 7).unwrap_err();
        match err {
            VacationError::NoApproverAssigned {
                role,
                department_id,
            } => {
                assert_eq!(role, ApproverRole::WorkplaceSupervisor);
                assert_eq!(department_id, 7);
            }
            other => panic!("expected NoApproverAssigned, got {other:?}"),
        }
    }

    #[test]
    fn role_names_render_snake_case() {
        assert_eq!(
            ApproverRole::WorkplaceSupervisor.to_string(),
            "workplace_supervisor"
        );
    }
}
