use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single staff member's vacation request. The `status` column is the
/// authoritative lifecycle state; every write to it is conditional on the
/// expected current value.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 17,
        "staff_id": 100,
        "department_id": 4,
        "vacation_type_id": 1,
        "total_days": 7,
        "documentation_note": null,
        "status": "facility_pending",
        "created_at": "2026-06-01T09:30:00Z"
    })
)]
pub struct VacationPlan {
    #[schema(example = 17)]
    pub id: u64,
    #[schema(example = 100)]
    pub staff_id: u64,
    #[schema(example = 4)]
    pub department_id: u64,
    #[schema(example = 1)]
    pub vacation_type_id: u64,
    #[schema(example = 7)]
    pub total_days: i64,
    #[schema(example = "medical certificate attached", nullable = true)]
    pub documentation_note: Option<String>,
    #[schema(example = "facility_pending")]
    pub status: String,
    #[schema(example = "2026-06-01T09:30:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One contiguous date range of a plan. Immutable after submission.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct VacationSplit {
    #[schema(example = 31)]
    pub id: u64,
    #[schema(example = 17)]
    pub plan_id: u64,
    #[schema(example = "2026-07-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-07-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = 5)]
    pub day_count: i64,
}
