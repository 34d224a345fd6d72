//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub assigned_to: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task within a project the caller owns.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    pub project: DbId,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub title: String,
    pub description: Option<String>,
}

/// DTO for updating an existing task. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}
