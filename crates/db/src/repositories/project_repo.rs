//! Repository for the `projects` table.
//!
//! Every read and write is scoped to the owning user: a project outside the
//! caller's ownership behaves exactly like one that does not exist.

use sqlx::PgPool;
use taskhub_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, description, created_at, updated_at";

/// Provides owner-scoped CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (owner_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID, visible only to its owner.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List the owner's projects, most recently created first.
    pub async fn list_for_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied; the
    /// owner is immutable. Returns `None` if the project is not in scope.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. Returns `true` if an in-scope row was removed.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
