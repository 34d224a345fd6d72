//! Timeline event model.
//!
//! Rows are append-only: there is no update or delete DTO by design.

use serde::Serialize;
use sqlx::FromRow;
use taskhub_core::types::{DbId, Timestamp};

/// A timeline event row from the `timeline_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimelineEvent {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub event_type: String,
    pub description: String,
    pub created_at: Timestamp,
}
