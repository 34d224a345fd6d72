//! Comment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// A comment row from the `comments` table.
///
/// A comment attaches to a project, a task, or both; the schema forbids
/// neither (`ck_comments_target`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comment. At least one of `project`/`task` must be set;
/// the handler enforces this before touching the database.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    pub project: Option<DbId>,
    pub task: Option<DbId>,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub content: String,
}

/// DTO for updating a comment. Only the content is mutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComment {
    pub content: Option<String>,
}
