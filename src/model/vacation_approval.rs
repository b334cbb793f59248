use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One decision event in a plan's approval trail. Append-only: rows are
/// created pending and written once when the owning approver decides.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 52,
        "plan_id": 17,
        "level": 2,
        "approver_id": 42,
        "status": "approved",
        "comment": "coverage confirmed",
        "has_conflict": true,
        "conflict_reason": "3 of 4 staff would be absent on 2026-07-10 (minimum 3 on duty)",
        "conflicting_plans": "[21, 35]",
        "created_at": "2026-06-02T08:00:00Z",
        "decided_at": "2026-06-03T10:15:00Z"
    })
)]
pub struct VacationApproval {
    #[schema(example = 52)]
    pub id: u64,
    #[schema(example = 17)]
    pub plan_id: u64,
    /// 1 = department, 2 = facility, 3 = workspace.
    #[schema(example = 2)]
    pub level: u8,
    #[schema(example = 42)]
    pub approver_id: u64,
    #[schema(example = "approved")]
    pub status: String,
    #[schema(example = "coverage confirmed", nullable = true)]
    pub comment: Option<String>,
    /// Advisory staffing finding at decision time; never blocks approval.
    #[schema(example = false)]
    pub has_conflict: bool,
    #[schema(nullable = true)]
    pub conflict_reason: Option<String>,
    /// JSON array of plan ids snapshotted by the conflict detector.
    #[schema(example = "[21, 35]", nullable = true)]
    pub conflicting_plans: Option<String>,
    #[schema(example = "2026-06-02T08:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
    #[schema(example = "2026-06-03T10:15:00Z", format = "date-time", value_type = String, nullable = true)]
    pub decided_at: Option<DateTime<Utc>>,
}
