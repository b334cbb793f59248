//! Read-only lookups over the organizational tables: staff → department →
//! facility → workspace membership, staffing numbers, and role holders.
//!
//! Injected into handlers via `web::Data`; holds no state beyond the pool.

use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::vacation::conflict::{ActivePlan, DepartmentStaffing};
use crate::vacation::split::DateRange;
use crate::vacation::status::PlanStatus;

#[derive(Clone)]
pub struct Directory {
    pool: MySqlPool,
}

#[derive(sqlx::FromRow)]
struct PlanSplitRow {
    plan_id: u64,
    staff_id: u64,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(sqlx::FromRow)]
struct StaffingRow {
    min_staff: u32,
    total_staff: i64,
}

/// SQL literal list of the statuses that count toward overlap and conflict
/// checks, derived from the status enum so the two never drift apart.
fn active_status_list() -> String {
    [
        PlanStatus::DepartmentPending,
        PlanStatus::FacilityPending,
        PlanStatus::WorkspacePending,
        PlanStatus::Approved,
    ]
    .iter()
    .map(|s| format!("'{}'", s.as_ref()))
    .collect::<Vec<_>>()
    .join(", ")
}

impl Directory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// The department a staff member belongs to.
    pub async fn staff_department(&self, staff_id: u64) -> sqlx::Result<Option<u64>> {
        sqlx::query_scalar::<_, u64>("SELECT department_id FROM staff WHERE id = ?")
            .bind(staff_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Resolve the single responsible approver for an approval level within
    /// a department's scope chain. `None` when the role is unassigned.
    pub async fn approver_for(&self, level: u8, department_id: u64) -> sqlx::Result<Option<u64>> {
        let sql = match level {
            1 => "SELECT d.head_id FROM departments d WHERE d.id = ?",
            2 => r#"
                SELECT f.supervisor_id
                FROM facilities f
                JOIN departments d ON d.facility_id = f.id
                WHERE d.id = ?
                "#,
            3 => r#"
                SELECT w.supervisor_id
                FROM workspaces w
                JOIN facilities f ON f.workspace_id = w.id
                JOIN departments d ON d.facility_id = f.id
                WHERE d.id = ?
                "#,
            _ => return Ok(None),
        };

        let holder = sqlx::query_scalar::<_, Option<u64>>(sql)
            .bind(department_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(holder.flatten())
    }

    /// Minimum staffing level and current headcount of a department.
    pub async fn department_staffing(
        &self,
        department_id: u64,
    ) -> sqlx::Result<Option<DepartmentStaffing>> {
        let row = sqlx::query_as::<_, StaffingRow>(
            r#"
            SELECT d.min_staff AS min_staff,
                   (SELECT COUNT(*) FROM staff s
                    WHERE s.department_id = d.id AND s.status = 'active') AS total_staff
            FROM departments d
            WHERE d.id = ?
            "#,
        )
        .bind(department_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| DepartmentStaffing {
            min_staff: r.min_staff,
            total_staff: r.total_staff.max(0) as u32,
        }))
    }

    /// The workspace's per-plan split cap for a department, if configured.
    pub async fn max_splits(&self, department_id: u64) -> sqlx::Result<Option<u32>> {
        let cap = sqlx::query_scalar::<_, Option<u32>>(
            r#"
            SELECT w.max_splits
            FROM workspaces w
            JOIN facilities f ON f.workspace_id = w.id
            JOIN departments d ON d.facility_id = f.id
            WHERE d.id = ?
            "#,
        )
        .bind(department_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(cap.flatten())
    }

    /// Every active plan of a department with its splits, excluding
    /// `exclude_plan_id` (0 is never a valid id, so it excludes nothing).
    pub async fn active_plans(
        &self,
        department_id: u64,
        exclude_plan_id: Option<u64>,
    ) -> sqlx::Result<Vec<ActivePlan>> {
        let sql = format!(
            r#"
            SELECT p.id AS plan_id, p.staff_id AS staff_id,
                   s.start_date AS start_date, s.end_date AS end_date
            FROM vacation_plans p
            JOIN vacation_splits s ON s.plan_id = p.id
            WHERE p.department_id = ?
              AND p.status IN ({statuses})
              AND p.id <> ?
            ORDER BY p.id, s.start_date
            "#,
            statuses = active_status_list()
        );

        let rows = sqlx::query_as::<_, PlanSplitRow>(&sql)
            .bind(department_id)
            .bind(exclude_plan_id.unwrap_or(0))
            .fetch_all(&self.pool)
            .await?;

        let mut plans: Vec<ActivePlan> = Vec::new();
        for row in rows {
            let range = DateRange::new(row.start_date, row.end_date);
            match plans.last_mut() {
                Some(plan) if plan.plan_id == row.plan_id => plan.splits.push(range),
                _ => plans.push(ActivePlan {
                    plan_id: row.plan_id,
                    staff_id: row.staff_id,
                    splits: vec![range],
                }),
            }
        }
        Ok(plans)
    }

    /// A staff member's own splits across their active plans, for the
    /// self-overlap check.
    pub async fn staff_active_splits(
        &self,
        staff_id: u64,
        exclude_plan_id: Option<u64>,
    ) -> sqlx::Result<Vec<DateRange>> {
        let sql = format!(
            r#"
            SELECT s.start_date, s.end_date
            FROM vacation_plans p
            JOIN vacation_splits s ON s.plan_id = p.id
            WHERE p.staff_id = ?
              AND p.status IN ({statuses})
              AND p.id <> ?
            ORDER BY s.start_date
            "#,
            statuses = active_status_list()
        );

        let rows = sqlx::query_as::<_, (NaiveDate, NaiveDate)>(&sql)
            .bind(staff_id)
            .bind(exclude_plan_id.unwrap_or(0))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(start, end)| DateRange::new(start, end))
            .collect())
    }
}
