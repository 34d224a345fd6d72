//! Handlers for the `/projects` resource.
//!
//! Every operation is scoped to the authenticated owner; a project owned by
//! someone else produces the same 404 as a nonexistent one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use taskhub_core::error::CoreError;
use taskhub_core::timeline::event_types;
use taskhub_core::types::DbId;
use taskhub_db::models::project::{CreateProject, Project, UpdateProject};
use taskhub_db::repositories::ProjectRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::timeline;

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;

    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;
    timeline::record(
        &state.pool,
        project.id,
        user.user_id,
        event_types::PROJECT_CREATED,
        &format!("Project '{}' created", project.name),
    )
    .await;

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_for_owner(&state.pool, user.user_id).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/projects/{id} and PATCH /api/projects/{id}
///
/// Both verbs apply the same partial-update semantics: absent fields keep
/// their stored values.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    if let Some(name) = &input.name {
        if name.is_empty() {
            return Err(AppError::Field {
                field: "name".to_string(),
                message: "This field may not be blank.".to_string(),
            });
        }
    }

    let project = ProjectRepo::update_for_owner(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    timeline::record(
        &state.pool,
        project.id,
        user.user_id,
        event_types::PROJECT_UPDATED,
        &format!("Project '{}' updated", project.name),
    )
    .await;

    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// No timeline event is recorded: the project's event rows are removed with
/// it by the foreign-key cascade.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete_for_owner(&state.pool, id, user.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}
