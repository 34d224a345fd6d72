//! Handlers for the `/comments` resource.
//!
//! A comment attaches to a project, a task, or both. Targets must be in the
//! caller's ownership scope; out-of-scope targets 404 like missing ones.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use taskhub_core::error::CoreError;
use taskhub_core::timeline::event_types;
use taskhub_core::types::DbId;
use taskhub_db::models::comment::{Comment, CreateComment, UpdateComment};
use taskhub_db::repositories::{CommentRepo, ProjectRepo, TaskRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::timeline;

/// Query parameters for `GET /api/comments`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub project: Option<DbId>,
    pub task: Option<DbId>,
}

/// POST /api/comments
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    input.validate()?;

    if input.project.is_none() && input.task.is_none() {
        return Err(AppError::Field {
            field: "non_field_errors".to_string(),
            message: "A comment must reference a project or a task.".to_string(),
        });
    }

    // Resolve targets up front; the project owning the comment determines
    // where the timeline entry lands.
    let mut event_project: Option<DbId> = None;

    if let Some(project_id) = input.project {
        ProjectRepo::find_for_owner(&state.pool, project_id, user.user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }))?;
        event_project = Some(project_id);
    }

    if let Some(task_id) = input.task {
        let task = TaskRepo::find_for_owner(&state.pool, task_id, user.user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Task",
                id: task_id,
            }))?;
        event_project.get_or_insert(task.project_id);
    }

    let comment =
        CommentRepo::create(&state.pool, input.project, input.task, &input.content).await?;

    if let Some(project_id) = event_project {
        timeline::record(
            &state.pool,
            project_id,
            user.user_id,
            event_types::COMMENT_ADDED,
            "Comment added",
        )
        .await;
    }

    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/comments
///
/// Optional `project` and `task` query filters narrow the in-scope listing.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Comment>>> {
    let comments =
        CommentRepo::list_for_owner(&state.pool, user.user_id, query.project, query.task).await?;
    Ok(Json(comments))
}

/// GET /api/comments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Comment>> {
    let comment = CommentRepo::find_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    Ok(Json(comment))
}

/// PUT /api/comments/{id} and PATCH /api/comments/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<Json<Comment>> {
    if let Some(content) = &input.content {
        if content.is_empty() {
            return Err(AppError::Field {
                field: "content".to_string(),
                message: "This field may not be blank.".to_string(),
            });
        }
    }

    let comment = CommentRepo::update_for_owner(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    Ok(Json(comment))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CommentRepo::delete_for_owner(&state.pool, id, user.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))
    }
}
