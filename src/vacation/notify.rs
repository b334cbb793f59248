use serde::Serialize;

use crate::vacation::router::ApproverRole;

/// One descriptive notification per status-changing event. Delivery, retry
/// and read-tracking happen outside the core.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationIntent {
    pub target_user_id: u64,
    pub title: String,
    pub message: String,
    pub related_plan_id: u64,
}

/// A committed status change, described for notification composition.
#[derive(Debug, Clone)]
pub enum PlanEvent {
    /// The plan entered a pending state; the newly-resolved approver is told.
    AwaitingApproval {
        plan_id: u64,
        approver_id: u64,
        level: u8,
    },
    /// Final approval; the requesting staff member is told.
    Approved { plan_id: u64, staff_id: u64 },
    /// Rejection at any level; the requesting staff member gets the comment.
    Rejected {
        plan_id: u64,
        staff_id: u64,
        comment: Option<String>,
    },
    /// The requester withdrew; the approver holding the open request is told.
    Withdrawn { plan_id: u64, approver_id: u64 },
}

pub fn compose(event: &PlanEvent) -> NotificationIntent {
    match event {
        PlanEvent::AwaitingApproval {
            plan_id,
            approver_id,
            level,
        } => {
            let role = ApproverRole::for_level(*level)
                .map(|r| r.to_string())
                .unwrap_or_else(|| "approver".to_string());
            NotificationIntent {
                target_user_id: *approver_id,
                title: "Vacation request awaiting your decision".to_string(),
                message: format!(
                    "Vacation request #{plan_id} is awaiting your review as {role}."
                ),
                related_plan_id: *plan_id,
            }
        }
        PlanEvent::Approved { plan_id, staff_id } => NotificationIntent {
            target_user_id: *staff_id,
            title: "Vacation request approved".to_string(),
            message: format!("Your vacation request #{plan_id} has been approved."),
            related_plan_id: *plan_id,
        },
        PlanEvent::Rejected {
            plan_id,
            staff_id,
            comment,
        } => {
            let message = match comment {
                Some(text) if !text.is_empty() => {
                    format!("Your vacation request #{plan_id} was rejected: {text}")
                }
                _ => format!("Your vacation request #{plan_id} was rejected."),
            };
            NotificationIntent {
                target_user_id: *staff_id,
                title: "Vacation request rejected".to_string(),
                message,
                related_plan_id: *plan_id,
            }
        }
        PlanEvent::Withdrawn {
            plan_id,
            approver_id,
        } => NotificationIntent {
            target_user_id: *approver_id,
            title: "Vacation request withdrawn".to_string(),
            message: format!("Vacation request #{plan_id} was withdrawn by the requester."),
            related_plan_id: *plan_id,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_transition_targets_the_new_approver() {
        let intent = compose(&PlanEvent::AwaitingApproval {
            plan_id: 9,
            approver_id: 55,
            level: 3,
        });
        assert_eq!(intent.target_user_id, 55);
        assert_eq!(intent.related_plan_id, 9);
        assert!(intent.message.contains("workplace_supervisor"));
    }

    #[test]
    fn approval_targets_the_requester() {
        let intent = compose(&PlanEvent::Approved {
            plan_id: 9,
            staff_id: 100,
        });
        assert_eq!(intent.target_user_id, 100);
        assert!(intent.title.contains("approved"));
    }

    #[test]
    fn rejection_carries_the_approver_comment() {
        let intent = compose(&PlanEvent::Rejected {
            plan_id: 9,
            staff_id: 100,
            comment: Some("insufficient notice".to_string()),
        });
        assert_eq!(intent.target_user_id, 100);
        assert!(intent.message.contains("insufficient notice"));
    }

    #[test]
    fn rejection_without_comment_still_reads_cleanly() {
        let intent = compose(&PlanEvent::Rejected {
            plan_id: 9,
            staff_id: 100,
            comment: None,
        });
        assert!(intent.message.ends_with("rejected."));
    }

    #[test]
    fn withdrawal_notifies_the_open_approver() {
        let intent = compose(&PlanEvent::Withdrawn {
            plan_id: 9,
            approver_id: 77,
        });
        assert_eq!(intent.target_user_id, 77);
        assert!(intent.message.contains("withdrawn"));
    }
}
