//! Handlers for the `/tasks` resource.
//!
//! A task is in scope when the authenticated user owns its parent project.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use taskhub_core::error::CoreError;
use taskhub_core::timeline::event_types;
use taskhub_core::types::DbId;
use taskhub_db::models::task::{CreateTask, Task, UpdateTask};
use taskhub_db::repositories::{ProjectRepo, TaskRepo, UserRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::timeline;

/// Request body for `POST /api/tasks/{id}/assign`.
///
/// `user_id` is optional at the serde level so a missing field maps to a 400
/// validation response rather than a deserialize rejection.
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub user_id: Option<DbId>,
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    input.validate()?;

    // The referenced project must be in the caller's scope.
    ProjectRepo::find_for_owner(&state.pool, input.project, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project,
        }))?;

    let task = TaskRepo::create(
        &state.pool,
        input.project,
        &input.title,
        input.description.as_deref(),
    )
    .await?;
    timeline::record(
        &state.pool,
        task.project_id,
        user.user_id,
        event_types::TASK_CREATED,
        &format!("Task '{}' created", task.title),
    )
    .await;

    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Task>>> {
    let tasks = TaskRepo::list_for_owner(&state.pool, user.user_id).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PUT /api/tasks/{id} and PATCH /api/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    if let Some(title) = &input.title {
        if title.is_empty() {
            return Err(AppError::Field {
                field: "title".to_string(),
                message: "This field may not be blank.".to_string(),
            });
        }
    }

    let task = TaskRepo::update_for_owner(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    timeline::record(
        &state.pool,
        task.project_id,
        user.user_id,
        event_types::TASK_UPDATED,
        &format!("Task '{}' updated", task.title),
    )
    .await;

    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    // Fetch first so the timeline entry can name the task and its project.
    let task = TaskRepo::find_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    let deleted = TaskRepo::delete_for_owner(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }

    timeline::record(
        &state.pool,
        task.project_id,
        user.user_id,
        event_types::TASK_DELETED,
        &format!("Task '{}' deleted", task.title),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/tasks/{id}/assign
///
/// Overwrite the task's assignee with the given user. Any existing user is
/// accepted as the target; assignment is not restricted to project members.
pub async fn assign(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AssignRequest>,
) -> AppResult<Json<Task>> {
    let assignee_id = input.user_id.ok_or(AppError::Field {
        field: "user_id".to_string(),
        message: "This field is required.".to_string(),
    })?;

    TaskRepo::find_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    let assignee = UserRepo::find_by_id(&state.pool, assignee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: assignee_id,
        }))?;

    let task = TaskRepo::assign(&state.pool, id, assignee.id).await?;
    timeline::record(
        &state.pool,
        task.project_id,
        user.user_id,
        event_types::TASK_ASSIGNED,
        &format!("Task '{}' assigned to {}", task.title, assignee.email),
    )
    .await;

    Ok(Json(task))
}
