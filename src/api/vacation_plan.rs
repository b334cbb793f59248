use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::directory::Directory;
use crate::model::vacation_approval::VacationApproval;
use crate::model::vacation_plan::{VacationPlan, VacationSplit};
use crate::notifier;
use crate::vacation::conflict::{self, ConflictReport};
use crate::vacation::engine::{self, Advance, VacationTypeRules};
use crate::vacation::error::VacationError;
use crate::vacation::notify::{self, PlanEvent};
use crate::vacation::router;
use crate::vacation::split::{DateRange, validate_splits};
use crate::vacation::status::{Decision, DecisionStatus, PlanStatus};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreatePlan {
    #[schema(example = 1)]
    pub vacation_type_id: u64,
    /// One or more non-overlapping date ranges.
    pub splits: Vec<DateRange>,
    /// Required when the vacation type demands supporting documentation.
    #[schema(example = "medical certificate attached", nullable = true)]
    pub documentation_note: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct DecideRequest {
    /// Approval level being decided: 1 = department, 2 = facility, 3 = workspace.
    #[schema(example = 2)]
    pub level: u8,
    #[schema(example = "approve")]
    pub outcome: Decision,
    #[schema(example = "coverage confirmed", nullable = true)]
    pub comment: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ConflictQuery {
    #[schema(example = 4)]
    pub department_id: u64,
    pub splits: Vec<DateRange>,
    /// Staff member the query is for; defaults to the caller's staff record.
    #[schema(example = 100, nullable = true)]
    pub staff_id: Option<u64>,
    /// Plan to leave out of the comparison (when re-checking an edit).
    #[schema(example = 17, nullable = true)]
    pub exclude_plan_id: Option<u64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PlanFilter {
    #[schema(example = 100)]
    /// Filter by requesting staff member
    pub staff_id: Option<u64>,
    #[schema(example = 4)]
    /// Filter by department
    pub department_id: Option<u64>,
    #[schema(example = "department_pending")]
    /// Filter by plan status
    pub status: Option<String>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>, // 1-based
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<u64>, // items per page
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    Str(&'a str),
}

#[derive(Serialize, ToSchema)]
pub struct PlanListResponse {
    pub data: Vec<VacationPlan>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

#[derive(Serialize, ToSchema)]
pub struct PlanDetailResponse {
    pub plan: VacationPlan,
    pub splits: Vec<VacationSplit>,
    pub approvals: Vec<VacationApproval>,
}

/// Map a lifecycle error onto the HTTP surface.
///
/// `NoApproverAssigned` is a configuration fault: it is logged at error
/// level so administrators see it, and reported as a 503 rather than a
/// client mistake.
fn domain_error_response(err: VacationError) -> HttpResponse {
    match &err {
        VacationError::Validation(_) | VacationError::OverlapConflict { .. } => {
            HttpResponse::BadRequest().json(serde_json::json!({ "message": err.to_string() }))
        }
        VacationError::StaleTransition => {
            HttpResponse::Conflict().json(serde_json::json!({ "message": err.to_string() }))
        }
        VacationError::Unauthorized => {
            HttpResponse::Forbidden().json(serde_json::json!({ "message": err.to_string() }))
        }
        VacationError::NoApproverAssigned {
            role,
            department_id,
        } => {
            tracing::error!(%role, department_id, "Approver routing is misconfigured");
            HttpResponse::ServiceUnavailable()
                .json(serde_json::json!({ "message": err.to_string() }))
        }
    }
}

fn parse_status(raw: &str, plan_id: u64) -> Result<PlanStatus, actix_web::Error> {
    raw.parse::<PlanStatus>().map_err(|_| {
        tracing::error!(plan_id, status = raw, "Plan carries an unknown status");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })
}

/* =========================
Submit a vacation plan
========================= */
/// Swagger doc for submit_plan endpoint
#[utoipa::path(
    post,
    path = "/api/v1/vacation",
    request_body(
        content = CreatePlan,
        description = "Vacation plan payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Vacation plan submitted", body = Object, example = json!({
            "message": "Vacation plan submitted",
            "plan_id": 17,
            "status": "department_pending"
        })),
        (status = 400, description = "Invalid splits, type limits, or overlapping own vacation"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 503, description = "No department head assigned")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Vacation"
)]
pub async fn submit_plan(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    directory: web::Data<Directory>,
    config: web::Data<Config>,
    payload: web::Json<CreatePlan>,
) -> actix_web::Result<impl Responder> {
    let staff_id: u64 = auth
        .staff_id
        .ok_or_else(|| actix_web::error::ErrorForbidden("No staff profile"))?;

    let department_id = directory
        .staff_department(staff_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, staff_id, "Failed to resolve department");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?
        .ok_or_else(|| actix_web::error::ErrorForbidden("No department membership"))?;

    let vtype = sqlx::query_as::<_, (i64, bool)>(
        "SELECT max_days, requires_documentation FROM vacation_types WHERE id = ?",
    )
    .bind(payload.vacation_type_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to load vacation type");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some((max_days, requires_documentation)) = vtype else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Unknown vacation type"
        })));
    };
    let rules = VacationTypeRules {
        max_days,
        requires_documentation,
    };

    let max_splits = directory
        .max_splits(department_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, department_id, "Failed to load split cap");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?
        .unwrap_or(config.max_splits_fallback) as usize;

    let existing = directory
        .staff_active_splits(staff_id, None)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, staff_id, "Failed to load active splits");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let total_days = match engine::validate_submit(
        &payload.splits,
        &rules,
        max_splits,
        payload.documentation_note.as_deref(),
        &existing,
    ) {
        Ok(days) => days,
        Err(err) => return Ok(domain_error_response(err)),
    };

    // The level-1 approver must exist before anything is persisted.
    let resolved = directory
        .approver_for(1, department_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, department_id, "Failed to resolve approver");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;
    let approver_id = match router::require_approver(1, resolved, department_id) {
        Ok(id) => id,
        Err(err) => return Ok(domain_error_response(err)),
    };

    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to open transaction");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let insert = sqlx::query(
        r#"
        INSERT INTO vacation_plans
            (staff_id, department_id, vacation_type_id, total_days, documentation_note, status)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(staff_id)
    .bind(department_id)
    .bind(payload.vacation_type_id)
    .bind(total_days)
    .bind(&payload.documentation_note)
    .bind(PlanStatus::DepartmentPending.as_ref())
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, staff_id, "Failed to create vacation plan");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;
    let plan_id = insert.last_insert_id();

    for split in &payload.splits {
        sqlx::query(
            r#"
            INSERT INTO vacation_splits (plan_id, start_date, end_date, day_count)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(plan_id)
        .bind(split.start_date)
        .bind(split.end_date)
        .bind(split.day_count())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, plan_id, "Failed to store split");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;
    }

    sqlx::query(
        r#"
        INSERT INTO vacation_approvals (plan_id, level, approver_id, status)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(plan_id)
    .bind(1u8)
    .bind(approver_id)
    .bind(DecisionStatus::Pending.as_ref())
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to create approval request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to commit submission");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    notifier::dispatch(
        pool.get_ref(),
        notify::compose(&PlanEvent::AwaitingApproval {
            plan_id,
            approver_id,
            level: 1,
        }),
    )
    .await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Vacation plan submitted",
        "plan_id": plan_id,
        "status": PlanStatus::DepartmentPending,
        "total_days": total_days
    })))
}

/* =========================
Decide at the current approval level
========================= */
/// Swagger doc for decide_plan endpoint
#[utoipa::path(
    put,
    path = "/api/v1/vacation/{plan_id}/decide",
    params(
        ("plan_id" = u64, Path, description = "ID of the vacation plan to decide")
    ),
    request_body(
        content = DecideRequest,
        description = "Approval decision payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Decision recorded", body = Object, example = json!({
            "message": "Vacation plan advanced",
            "status": "workspace_pending",
            "has_conflict": false
        })),
        (status = 403, description = "Caller is not the responsible approver"),
        (status = 404, description = "Vacation plan not found"),
        (status = 409, description = "Request was already acted on"),
        (status = 503, description = "Next approver not assigned")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Vacation"
)]
pub async fn decide_plan(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    directory: web::Data<Directory>,
    path: web::Path<u64>,
    payload: web::Json<DecideRequest>,
) -> actix_web::Result<impl Responder> {
    let plan_id = path.into_inner();
    let actor_id: u64 = auth
        .staff_id
        .ok_or_else(|| actix_web::error::ErrorForbidden("No staff profile"))?;

    let plan = sqlx::query_as::<_, (u64, u64, String)>(
        "SELECT staff_id, department_id, status FROM vacation_plans WHERE id = ?",
    )
    .bind(plan_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to fetch vacation plan");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some((staff_id, department_id, raw_status)) = plan else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Vacation plan not found"
        })));
    };
    let current = parse_status(&raw_status, plan_id)?;

    if let Err(err) = engine::validate_decide(current, payload.level) {
        return Ok(domain_error_response(err));
    }

    // The caller must be the directory-resolved approver for this level.
    let resolved = directory
        .approver_for(payload.level, department_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, department_id, "Failed to resolve approver");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;
    let responsible = match router::require_approver(payload.level, resolved, department_id) {
        Ok(id) => id,
        Err(err) => return Ok(domain_error_response(err)),
    };
    if let Err(err) = engine::authorize_approver(responsible, actor_id) {
        return Ok(domain_error_response(err));
    }

    let advance = match engine::apply_decision(current, payload.outcome) {
        Ok(a) => a,
        Err(err) => return Ok(domain_error_response(err)),
    };

    // Staffing findings are advisory; recorded on the approval row, shown to
    // the next approver, never blocking.
    let report = if payload.outcome == Decision::Approve {
        let staffing = directory
            .department_staffing(department_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, department_id, "Failed to load staffing");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?
            .ok_or_else(|| {
                tracing::error!(department_id, "Department vanished during decision");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;

        let splits = sqlx::query_as::<_, (chrono::NaiveDate, chrono::NaiveDate)>(
            "SELECT start_date, end_date FROM vacation_splits WHERE plan_id = ? ORDER BY start_date",
        )
        .bind(plan_id)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, plan_id, "Failed to load splits");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?
        .into_iter()
        .map(|(start, end)| DateRange::new(start, end))
        .collect::<Vec<_>>();

        let others = directory
            .active_plans(department_id, Some(plan_id))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, department_id, "Failed to load active plans");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;

        conflict::detect(&staffing, staff_id, &splits, &others)
    } else {
        ConflictReport::clear()
    };

    // Resolve the next approver before any write, so a routing gap leaves
    // the plan untouched at its current level.
    let next_approver = match advance {
        Advance::Next { level, .. } => {
            let resolved = directory
                .approver_for(level, department_id)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, department_id, "Failed to resolve next approver");
                    actix_web::error::ErrorInternalServerError("Internal Server Error")
                })?;
            match router::require_approver(level, resolved, department_id) {
                Ok(id) => Some(id),
                Err(err) => return Ok(domain_error_response(err)),
            }
        }
        Advance::Terminal(_) => None,
    };

    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to open transaction");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    // Optimistic-concurrency guard: the status write is conditional on the
    // expected pre-state; a racing second decision affects zero rows.
    let updated = sqlx::query(
        r#"
        UPDATE vacation_plans
        SET status = ?
        WHERE id = ?
        AND status = ?
        "#,
    )
    .bind(advance.status().as_ref())
    .bind(plan_id)
    .bind(current.as_ref())
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to update plan status");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if updated.rows_affected() == 0 {
        tx.rollback().await.ok();
        return Ok(domain_error_response(VacationError::StaleTransition));
    }

    let decision_status = match payload.outcome {
        Decision::Approve => DecisionStatus::Approved,
        Decision::Reject => DecisionStatus::Rejected,
    };
    let conflicting_json = serde_json::to_string(&report.conflicting_plans)
        .unwrap_or_else(|_| "[]".to_string());

    let decided = sqlx::query(
        r#"
        UPDATE vacation_approvals
        SET status = ?, comment = ?, has_conflict = ?, conflict_reason = ?,
            conflicting_plans = ?, decided_at = NOW()
        WHERE plan_id = ?
        AND level = ?
        AND status = ?
        "#,
    )
    .bind(decision_status.as_ref())
    .bind(&payload.comment)
    .bind(report.has_conflict)
    .bind(&report.conflict_reason)
    .bind(&conflicting_json)
    .bind(plan_id)
    .bind(payload.level)
    .bind(DecisionStatus::Pending.as_ref())
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to record decision");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if decided.rows_affected() == 0 {
        tx.rollback().await.ok();
        return Ok(domain_error_response(VacationError::StaleTransition));
    }

    if let (Advance::Next { level, .. }, Some(approver_id)) = (advance, next_approver) {
        sqlx::query(
            r#"
            INSERT INTO vacation_approvals (plan_id, level, approver_id, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(plan_id)
        .bind(level)
        .bind(approver_id)
        .bind(DecisionStatus::Pending.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, plan_id, level, "Failed to create next approval request");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;
    }

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to commit decision");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let event = match (advance, next_approver) {
        (Advance::Next { level, .. }, Some(approver_id)) => PlanEvent::AwaitingApproval {
            plan_id,
            approver_id,
            level,
        },
        (Advance::Terminal(PlanStatus::Approved), _) => PlanEvent::Approved { plan_id, staff_id },
        _ => PlanEvent::Rejected {
            plan_id,
            staff_id,
            comment: payload.comment.clone(),
        },
    };
    notifier::dispatch(pool.get_ref(), notify::compose(&event)).await;

    let message = match advance {
        Advance::Next { .. } => "Vacation plan advanced",
        Advance::Terminal(PlanStatus::Approved) => "Vacation plan approved",
        Advance::Terminal(_) => "Vacation plan rejected",
    };
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": message,
        "status": advance.status(),
        "has_conflict": report.has_conflict,
        "conflict_reason": report.conflict_reason,
        "conflicting_plans": report.conflicting_plans
    })))
}

/* =========================
Withdraw an own pending plan
========================= */
/// Swagger doc for withdraw_plan endpoint
#[utoipa::path(
    put,
    path = "/api/v1/vacation/{plan_id}/withdraw",
    params(
        ("plan_id" = u64, Path, description = "ID of the vacation plan to withdraw")
    ),
    responses(
        (status = 200, description = "Plan withdrawn", body = Object, example = json!({
            "message": "Vacation plan withdrawn"
        })),
        (status = 403, description = "Not the plan owner"),
        (status = 404, description = "Vacation plan not found"),
        (status = 409, description = "Plan is no longer pending")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Vacation"
)]
pub async fn withdraw_plan(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let plan_id = path.into_inner();
    let staff_id: u64 = auth
        .staff_id
        .ok_or_else(|| actix_web::error::ErrorForbidden("No staff profile"))?;

    let plan = sqlx::query_as::<_, (u64, String)>(
        "SELECT staff_id, status FROM vacation_plans WHERE id = ?",
    )
    .bind(plan_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to fetch vacation plan");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some((owner_id, raw_status)) = plan else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Vacation plan not found"
        })));
    };
    if owner_id != staff_id {
        return Err(actix_web::error::ErrorForbidden(
            "Only the requesting staff member may withdraw a plan",
        ));
    }
    let current = parse_status(&raw_status, plan_id)?;

    if let Err(err) = engine::validate_withdraw(current) {
        return Ok(domain_error_response(err));
    }

    // The approver currently holding the open request, for notification.
    let open_approver = sqlx::query_scalar::<_, u64>(
        r#"
        SELECT approver_id FROM vacation_approvals
        WHERE plan_id = ? AND status = ?
        ORDER BY level DESC
        LIMIT 1
        "#,
    )
    .bind(plan_id)
    .bind(DecisionStatus::Pending.as_ref())
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to resolve open approver");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let updated = sqlx::query(
        r#"
        UPDATE vacation_plans
        SET status = ?
        WHERE id = ?
        AND status = ?
        "#,
    )
    .bind(PlanStatus::Withdrawn.as_ref())
    .bind(plan_id)
    .bind(current.as_ref())
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to withdraw plan");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if updated.rows_affected() == 0 {
        return Ok(domain_error_response(VacationError::StaleTransition));
    }

    if let Some(approver_id) = open_approver {
        notifier::dispatch(
            pool.get_ref(),
            notify::compose(&PlanEvent::Withdrawn {
                plan_id,
                approver_id,
            }),
        )
        .await;
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Vacation plan withdrawn"
    })))
}

/* =========================
Advisory staffing-conflict query
========================= */
/// Swagger doc for query_conflicts endpoint
#[utoipa::path(
    post,
    path = "/api/v1/vacation/conflicts",
    request_body(
        content = ConflictQuery,
        description = "Department, proposed splits and optional exclusions",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Advisory conflict report", body = ConflictReport),
        (status = 400, description = "Invalid splits or unknown department"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Vacation"
)]
pub async fn query_conflicts(
    auth: AuthUser,
    directory: web::Data<Directory>,
    config: web::Data<Config>,
    payload: web::Json<ConflictQuery>,
) -> actix_web::Result<impl Responder> {
    let Some(staff_id) = payload.staff_id.or(auth.staff_id) else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "staff_id is required for callers without a staff profile"
        })));
    };

    if let Err(err) = validate_splits(&payload.splits, config.max_splits_fallback as usize) {
        return Ok(domain_error_response(err));
    }

    let staffing = directory
        .department_staffing(payload.department_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, department_id = payload.department_id, "Failed to load staffing");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;
    let Some(staffing) = staffing else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Unknown department"
        })));
    };

    let others = directory
        .active_plans(payload.department_id, payload.exclude_plan_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, department_id = payload.department_id, "Failed to load active plans");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let report = conflict::detect(&staffing, staff_id, &payload.splits, &others);
    Ok(HttpResponse::Ok().json(report))
}

/// for getting a vacation plan with its splits and approval trail
#[utoipa::path(
    get,
    path = "/api/v1/vacation/{plan_id}",
    params(
        ("plan_id" = u64, Path, description = "ID of the vacation plan to fetch")
    ),
    responses(
        (status = 200, description = "Vacation plan found", body = PlanDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Vacation plan not found", body = Object, example = json!({
            "message": "Vacation plan not found"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Vacation"
)]
pub async fn get_plan(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let plan_id = path.into_inner();

    let plan = sqlx::query_as::<_, VacationPlan>(
        r#"
        SELECT id, staff_id, department_id, vacation_type_id, total_days,
               documentation_note, status, created_at
        FROM vacation_plans
        WHERE id = ?
        "#,
    )
    .bind(plan_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to fetch vacation plan");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some(plan) = plan else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Vacation plan not found"
        })));
    };

    // Staff see their own plans; supervisors and admins see all.
    if auth.is_staff() && auth.staff_id != Some(plan.staff_id) {
        return Err(actix_web::error::ErrorForbidden("Not your vacation plan"));
    }

    let splits = sqlx::query_as::<_, VacationSplit>(
        r#"
        SELECT id, plan_id, start_date, end_date, day_count
        FROM vacation_splits
        WHERE plan_id = ?
        ORDER BY start_date
        "#,
    )
    .bind(plan_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to fetch splits");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let approvals = sqlx::query_as::<_, VacationApproval>(
        r#"
        SELECT id, plan_id, level, approver_id, status, comment,
               has_conflict, conflict_reason, conflicting_plans, created_at, decided_at
        FROM vacation_approvals
        WHERE plan_id = ?
        ORDER BY level
        "#,
    )
    .bind(plan_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, plan_id, "Failed to fetch approval trail");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(PlanDetailResponse {
        plan,
        splits,
        approvals,
    }))
}

/// for listing vacation plans
#[utoipa::path(
    get,
    path = "/api/v1/vacation",
    params(PlanFilter),
    responses(
        (status = 200, description = "Paginated vacation plan list", body = PlanListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Vacation"
)]
pub async fn plan_list(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<PlanFilter>,
) -> actix_web::Result<impl Responder> {
    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    // -------------------------
    // WHERE clause
    // -------------------------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    // Staff only ever see their own plans.
    if auth.is_staff() {
        let staff_id = auth
            .staff_id
            .ok_or_else(|| actix_web::error::ErrorForbidden("No staff profile"))?;
        where_sql.push_str(" AND staff_id = ?");
        args.push(FilterValue::U64(staff_id));
    } else {
        auth.require_supervisor_or_admin()?;
        if let Some(staff_id) = query.staff_id {
            where_sql.push_str(" AND staff_id = ?");
            args.push(FilterValue::U64(staff_id));
        }
    }

    if let Some(department_id) = query.department_id {
        where_sql.push_str(" AND department_id = ?");
        args.push(FilterValue::U64(department_id));
    }

    if let Some(status) = query.status.as_deref() {
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    // -------------------------
    // COUNT query
    // -------------------------
    let count_sql = format!("SELECT COUNT(*) FROM vacation_plans{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error=%e, "Failed to count vacation plans");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    // -------------------------
    // DATA query
    // -------------------------
    let data_sql = format!(
        r#"
        SELECT id, staff_id, department_id, vacation_type_id, total_days,
               documentation_note, status, created_at
        FROM vacation_plans
        {}
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, VacationPlan>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let plans = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error=%e, "Failed to fetch vacation plan list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    // -------------------------
    // Response
    // -------------------------
    let response = PlanListResponse {
        data: plans,
        page: page as u32,
        per_page: per_page as u32,
        total,
    };

    Ok(HttpResponse::Ok().json(response))
}
