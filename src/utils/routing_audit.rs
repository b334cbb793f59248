use anyhow::Result;
use sqlx::MySqlPool;
use tracing::{info, warn};

/// Audit approver routing across all departments at startup.
///
/// A department whose chain is missing a head, facility supervisor or
/// workplace supervisor will strand plans at that level with a routing
/// failure; logging the gaps up front surfaces the configuration fault to
/// administrators before a request hits it.
pub async fn audit_approver_routing(pool: &MySqlPool) -> Result<()> {
    let rows = sqlx::query_as::<_, (u64, String, Option<u64>, Option<u64>, Option<u64>)>(
        r#"
        SELECT d.id, d.name, d.head_id, f.supervisor_id, w.supervisor_id
        FROM departments d
        JOIN facilities f ON d.facility_id = f.id
        JOIN workspaces w ON f.workspace_id = w.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    let departments = rows.len();
    let mut gaps = 0usize;
    for (department_id, name, head, facility_sup, workspace_sup) in rows {
        if head.is_none() {
            warn!(department_id, department = %name, "No department head assigned; level-1 approvals will fail");
            gaps += 1;
        }
        if facility_sup.is_none() {
            warn!(department_id, department = %name, "No facility supervisor assigned; level-2 approvals will fail");
            gaps += 1;
        }
        if workspace_sup.is_none() {
            warn!(department_id, department = %name, "No workplace supervisor assigned; level-3 approvals will fail");
            gaps += 1;
        }
    }

    info!(departments, gaps, "Approver routing audit complete");
    Ok(())
}
