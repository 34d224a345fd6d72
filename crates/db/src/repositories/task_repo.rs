//! Repository for the `tasks` table.
//!
//! Tasks are visible only to the owner of their parent project; scoping is
//! enforced in SQL via a join to `projects.owner_id`, so an out-of-scope
//! task ID behaves like a missing one.

use sqlx::PgPool;
use taskhub_core::types::DbId;

use crate::models::task::{Task, UpdateTask};

/// Column list shared across queries, qualified for joined reads.
const COLUMNS: &str =
    "t.id, t.project_id, t.title, t.description, t.is_completed, t.assigned_to, \
     t.created_at, t.updated_at";

/// Provides owner-scoped CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task. The caller has already verified project ownership.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        title: &str,
        description: Option<&str>,
    ) -> Result<Task, sqlx::Error> {
        let query = "INSERT INTO tasks (project_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING id, project_id, title, description, is_completed, assigned_to, \
                       created_at, updated_at";
        sqlx::query_as::<_, Task>(query)
            .bind(project_id)
            .bind(title)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID, visible only to the parent project's owner.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE t.id = $1 AND p.owner_id = $2"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks across the owner's projects, newest first.
    pub async fn list_for_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE p.owner_id = $1
             ORDER BY t.created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    /// Returns `None` if the task is not in scope.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = "UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                is_completed = COALESCE($5, is_completed),
                updated_at = NOW()
             WHERE id = $1 AND project_id IN (SELECT id FROM projects WHERE owner_id = $2)
             RETURNING id, project_id, title, description, is_completed, assigned_to, \
                       created_at, updated_at";
        sqlx::query_as::<_, Task>(query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_completed)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task. Returns `true` if an in-scope row was removed.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM tasks
             WHERE id = $1 AND project_id IN (SELECT id FROM projects WHERE owner_id = $2)",
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the task's assignee. The caller has already resolved both
    /// the in-scope task and the target user; no same-project check is made.
    pub async fn assign(
        pool: &PgPool,
        id: DbId,
        assignee_id: DbId,
    ) -> Result<Task, sqlx::Error> {
        let query = "UPDATE tasks SET assigned_to = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING id, project_id, title, description, is_completed, assigned_to, \
                       created_at, updated_at";
        sqlx::query_as::<_, Task>(query)
            .bind(id)
            .bind(assignee_id)
            .fetch_one(pool)
            .await
    }
}
