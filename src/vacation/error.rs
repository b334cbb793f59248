use chrono::NaiveDate;
use thiserror::Error;

use crate::vacation::router::ApproverRole;

/// Errors produced by the vacation lifecycle core.
///
/// Conflict-detector findings are not errors; they travel as advisory data
/// on the approval record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VacationError {
    #[error("{0}")]
    Validation(String),

    #[error("requested dates overlap an existing vacation from {start} to {end}")]
    OverlapConflict { start: NaiveDate, end: NaiveDate },

    #[error("this request was already acted on")]
    StaleTransition,

    #[error("you are not the responsible approver for this request")]
    Unauthorized,

    #[error("no {role} is assigned for department {department_id}")]
    NoApproverAssigned {
        role: ApproverRole,
        department_id: u64,
    },
}

impl VacationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        VacationError::Validation(msg.into())
    }
}
