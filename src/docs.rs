use crate::api::vacation_plan::{
    ConflictQuery, CreatePlan, DecideRequest, PlanDetailResponse, PlanFilter, PlanListResponse,
};
use crate::api::vacation_type::CreateVacationType;
use crate::model::vacation_approval::VacationApproval;
use crate::model::vacation_plan::{VacationPlan, VacationSplit};
use crate::model::vacation_type::VacationType;
use crate::vacation::conflict::ConflictReport;
use crate::vacation::split::DateRange;
use crate::vacation::status::{Decision, DecisionStatus, PlanStatus};
use utoipa::OpenApi;
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Workforce Vacation Management API",
        version = "1.0.0",
        description = r#"
## Workforce Vacation Management

This API powers the vacation-request lifecycle of a workforce-management system.

### 🔹 Key Features
- **Vacation Plans**
  - Submit multi-split vacation requests, withdraw pending ones, list and view history
- **Three-Level Approval**
  - Department head → facility supervisor → workplace supervisor, with a full audit trail
- **Staffing Conflicts**
  - Advisory detection of department coverage shortfalls, surfaced at every approval level
- **Vacation Types**
  - Administrator-managed limits and documentation requirements

### 🔐 Security
All endpoints are protected using **JWT Bearer authentication**; tokens are issued
by the external identity service. Approval decisions additionally require the
caller to be the directory-resolved approver for the level.

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::vacation_plan::plan_list,
        crate::api::vacation_plan::get_plan,
        crate::api::vacation_plan::submit_plan,
        crate::api::vacation_plan::decide_plan,
        crate::api::vacation_plan::withdraw_plan,
        crate::api::vacation_plan::query_conflicts,

        crate::api::vacation_type::create_vacation_type,
        crate::api::vacation_type::list_vacation_types
    ),
    components(
        schemas(
            CreatePlan,
            DecideRequest,
            ConflictQuery,
            PlanFilter,
            PlanListResponse,
            PlanDetailResponse,
            VacationPlan,
            VacationSplit,
            VacationApproval,
            VacationType,
            CreateVacationType,
            ConflictReport,
            DateRange,
            PlanStatus,
            DecisionStatus,
            Decision
        )
    ),
    tags(
        (name = "Vacation", description = "Vacation plan lifecycle APIs"),
        (name = "VacationType", description = "Vacation type reference-data APIs"),
    )
)]
pub struct ApiDoc;
