//! Repository for the `comments` table.
//!
//! A comment is in scope when its project -- or its task's project -- is
//! owned by the caller.

use sqlx::PgPool;
use taskhub_core::types::DbId;

use crate::models::comment::{Comment, UpdateComment};

/// Column list shared across queries, qualified for the `c` alias.
const COLUMNS: &str = "c.id, c.project_id, c.task_id, c.content, c.created_at, c.updated_at";

/// Ownership predicate for id-scoped queries ($1 = comment id, $2 = owner).
const IN_SCOPE: &str = "(c.project_id IN (SELECT id FROM projects WHERE owner_id = $2)
         OR c.task_id IN (SELECT t.id FROM tasks t
                          JOIN projects p ON p.id = t.project_id
                          WHERE p.owner_id = $2))";

/// Provides owner-scoped CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment. The caller has already validated that at least
    /// one target is set and that every referenced target is in scope.
    pub async fn create(
        pool: &PgPool,
        project_id: Option<DbId>,
        task_id: Option<DbId>,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = "INSERT INTO comments (project_id, task_id, content)
             VALUES ($1, $2, $3)
             RETURNING id, project_id, task_id, content, created_at, updated_at";
        sqlx::query_as::<_, Comment>(query)
            .bind(project_id)
            .bind(task_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by ID within the owner's scope.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM comments AS c WHERE c.id = $1 AND {IN_SCOPE}");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List in-scope comments, optionally filtered to one project or task,
    /// newest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
        project_id: Option<DbId>,
        task_id: Option<DbId>,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments AS c
             WHERE (c.project_id IN (SELECT id FROM projects WHERE owner_id = $1)
                    OR c.task_id IN (SELECT t.id FROM tasks t
                                     JOIN projects p ON p.id = t.project_id
                                     WHERE p.owner_id = $1))
               AND ($2::BIGINT IS NULL OR c.project_id = $2)
               AND ($3::BIGINT IS NULL OR c.task_id = $3)
             ORDER BY c.created_at DESC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(owner_id)
            .bind(project_id)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// Update a comment's content. Returns `None` if not in scope.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateComment,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments AS c SET content = COALESCE($3, content), updated_at = NOW()
             WHERE c.id = $1 AND {IN_SCOPE}
             RETURNING id, project_id, task_id, content, created_at, updated_at"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment. Returns `true` if an in-scope row was removed.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM comments AS c WHERE c.id = $1 AND {IN_SCOPE}");
        let result = sqlx::query(&query)
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
