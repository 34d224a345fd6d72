//! Handlers for the read-only `/notifications` resource.

use axum::extract::State;
use axum::Json;
use taskhub_db::models::notification::Notification;
use taskhub_db::repositories::NotificationRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/notifications
///
/// List the authenticated user's notifications, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(notifications))
}
