//! Repository for the `notifications` table.
//!
//! The API only reads this table; rows are produced by external processes
//! (and by tests). `create` exists for those writers.

use sqlx::PgPool;
use taskhub_core::types::DbId;

use crate::models::notification::Notification;

/// Column list shared across queries.
const COLUMNS: &str = "id, user_id, message, is_read, created_at";

/// Provides read (and external write) operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification for a user, returning the row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        message: &str,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, message)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(message)
            .fetch_one(pool)
            .await
    }

    /// List a user's notifications, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
