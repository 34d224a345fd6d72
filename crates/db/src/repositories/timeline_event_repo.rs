//! Repository for the append-only `timeline_events` table.
//!
//! There are deliberately no update or delete operations.

use sqlx::PgPool;
use taskhub_core::types::DbId;

use crate::models::timeline_event::TimelineEvent;

/// Column list shared across queries.
const COLUMNS: &str = "id, project_id, user_id, event_type, description, created_at";

/// Provides append and read operations for timeline events.
pub struct TimelineEventRepo;

impl TimelineEventRepo {
    /// Append one event row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        event_type: &str,
        description: &str,
    ) -> Result<TimelineEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO timeline_events (project_id, user_id, event_type, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimelineEvent>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(event_type)
            .bind(description)
            .fetch_one(pool)
            .await
    }

    /// List a project's events, newest first. The caller has already
    /// verified project ownership.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TimelineEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM timeline_events
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TimelineEvent>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
