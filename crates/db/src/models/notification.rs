//! Notification entity model.

use serde::Serialize;
use sqlx::FromRow;
use taskhub_core::types::{DbId, Timestamp};

/// A notification row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}
