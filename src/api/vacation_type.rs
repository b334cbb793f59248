use crate::auth::auth::AuthUser;
use crate::model::vacation_type::VacationType;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateVacationType {
    #[schema(example = "Annual leave")]
    pub name: String,
    #[schema(example = 25)]
    pub max_days: i64,
    #[schema(example = false)]
    pub requires_documentation: bool,
}

/// Create vacation type (Admin)
#[utoipa::path(
    post,
    path = "/api/v1/vacation-type",
    request_body = CreateVacationType,
    responses(
        (status = 200, description = "Vacation type created", body = Object, example = json!({
            "message": "Vacation type created"
        })),
        (status = 400, description = "Invalid limits"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "VacationType"
)]
pub async fn create_vacation_type(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateVacationType>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    if payload.max_days <= 0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "max_days must be positive"
        })));
    }

    sqlx::query(
        r#"
        INSERT INTO vacation_types (name, max_days, requires_documentation)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&payload.name)
    .bind(payload.max_days)
    .bind(payload.requires_documentation)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create vacation type");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Vacation type created"
    })))
}

/// List vacation types
#[utoipa::path(
    get,
    path = "/api/v1/vacation-type",
    responses(
        (status = 200, description = "All vacation types", body = [VacationType]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "VacationType"
)]
pub async fn list_vacation_types(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let types = sqlx::query_as::<_, VacationType>(
        "SELECT id, name, max_days, requires_documentation FROM vacation_types ORDER BY name",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch vacation types");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(types))
}
