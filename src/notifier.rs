use sqlx::MySqlPool;

use crate::vacation::notify::NotificationIntent;

/// Hand a composed notification to the delivery layer.
///
/// Best-effort by contract: a failure here is logged and swallowed, never
/// rolled back against the committed status transition.
pub async fn dispatch(pool: &MySqlPool, intent: NotificationIntent) {
    let result = sqlx::query(
        r#"
        INSERT INTO notifications (user_id, title, message, plan_id)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(intent.target_user_id)
    .bind(&intent.title)
    .bind(&intent.message)
    .bind(intent.related_plan_id)
    .execute(pool)
    .await;

    if let Err(e) = result {
        tracing::warn!(
            error = %e,
            target_user_id = intent.target_user_id,
            plan_id = intent.related_plan_id,
            "Failed to deliver notification"
        );
    }
}
