use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Administrator-managed reference data; immutable from the lifecycle's
/// point of view.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Annual leave",
        "max_days": 25,
        "requires_documentation": false
    })
)]
pub struct VacationType {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Annual leave")]
    pub name: String,

    /// Maximum allowable days per plan of this type.
    #[schema(example = 25)]
    pub max_days: i64,

    /// Whether supporting documentation must accompany a submission.
    #[schema(example = false)]
    pub requires_documentation: bool,
}
