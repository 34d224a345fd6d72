//! Handlers for the `/documents` resource.
//!
//! Upload is multipart; the stored blob lives under the media root and only
//! its relative path is kept in the database.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use taskhub_core::error::CoreError;
use taskhub_core::timeline::event_types;
use taskhub_core::types::DbId;
use taskhub_db::models::document::{CreateDocument, Document, UpdateDocument};
use taskhub_db::repositories::{DocumentRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::timeline;

/// POST /api/documents
///
/// Multipart upload with fields:
/// - `file` (required): the document blob
/// - `project` (required): owning project id
/// - `name` (optional): display name, defaults to the uploaded filename
/// - `description` (optional)
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Document>)> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;
    let mut project_id: Option<DbId> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart data: {e}")))?
    {
        match field.name() {
            Some("file") => {
                file_name = field.file_name().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;
                file_data = Some(data.to_vec());
            }
            Some("project") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid project field: {e}")))?;
                project_id = Some(text.parse().map_err(|_| AppError::Field {
                    field: "project".to_string(),
                    message: "A valid integer is required.".to_string(),
                })?);
            }
            Some("name") => {
                name = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Invalid name field: {e}"))
                })?);
            }
            Some("description") => {
                description = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Invalid description field: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let file_data = file_data.ok_or(AppError::Field {
        field: "file".to_string(),
        message: "No file was submitted.".to_string(),
    })?;
    let project_id = project_id.ok_or(AppError::Field {
        field: "project".to_string(),
        message: "This field is required.".to_string(),
    })?;

    ProjectRepo::find_for_owner(&state.pool, project_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let original_name = file_name.unwrap_or_else(|| "upload".to_string());
    let stored_path = state
        .media
        .save(&original_name, &file_data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store file: {e}")))?;

    let input = CreateDocument {
        project_id,
        name: name.filter(|n| !n.is_empty()).unwrap_or(original_name),
        description,
        file_path: stored_path,
    };
    let document = DocumentRepo::create(&state.pool, user.user_id, &input).await?;
    timeline::record(
        &state.pool,
        document.project_id,
        user.user_id,
        event_types::DOCUMENT_UPLOADED,
        &format!("Document '{}' uploaded", document.name),
    )
    .await;

    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/documents
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Document>>> {
    let documents = DocumentRepo::list_for_owner(&state.pool, user.user_id).await?;
    Ok(Json(documents))
}

/// GET /api/documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Document>> {
    let document = DocumentRepo::find_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;
    Ok(Json(document))
}

/// GET /api/documents/{id}/download
///
/// Stream the stored blob back as an attachment.
pub async fn download(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let document = DocumentRepo::find_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;

    let data = state.media.read(&document.file_path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::Core(CoreError::NotFound {
                entity: "Document",
                id,
            })
        } else {
            AppError::InternalError(format!("Failed to read stored file: {e}"))
        }
    })?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.name),
        ),
    ];
    Ok((headers, data))
}

/// PUT /api/documents/{id} and PATCH /api/documents/{id}
///
/// Metadata only; the stored file is immutable after upload.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDocument>,
) -> AppResult<Json<Document>> {
    if let Some(name) = &input.name {
        if name.is_empty() {
            return Err(AppError::Field {
                field: "name".to_string(),
                message: "This field may not be blank.".to_string(),
            });
        }
    }

    let document = DocumentRepo::update_for_owner(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;
    Ok(Json(document))
}

/// DELETE /api/documents/{id}
///
/// Removes the row, then unlinks the stored blob best-effort; a failed
/// unlink is logged, not surfaced.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let document = DocumentRepo::delete_for_owner(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;

    if let Err(e) = state.media.remove(&document.file_path).await {
        tracing::warn!(error = %e, path = document.file_path, "Failed to unlink stored file");
    }

    Ok(StatusCode::NO_CONTENT)
}
