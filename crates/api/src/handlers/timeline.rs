//! Handlers for the read-only `/timeline` resource.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use taskhub_core::error::CoreError;
use taskhub_core::types::DbId;
use taskhub_db::models::timeline_event::TimelineEvent;
use taskhub_db::repositories::{ProjectRepo, TimelineEventRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /api/timeline`.
///
/// `project` is required; optional here only so its absence maps to a 400
/// validation response rather than a deserialize rejection.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub project: Option<DbId>,
}

/// GET /api/timeline?project={id}
///
/// List a project's events, newest first. The project must be in the
/// caller's ownership scope.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<TimelineEvent>>> {
    let project_id = query.project.ok_or(AppError::Field {
        field: "project".to_string(),
        message: "This query parameter is required.".to_string(),
    })?;

    ProjectRepo::find_for_owner(&state.pool, project_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let events = TimelineEventRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(events))
}
