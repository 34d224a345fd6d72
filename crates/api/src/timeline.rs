//! Best-effort timeline recording.
//!
//! Mutating handlers call [`record`] after the primary write commits. The
//! event insert is not part of the primary transaction: if it fails the
//! mutation still succeeded, so the failure is logged and swallowed.

use taskhub_core::types::DbId;
use taskhub_db::repositories::TimelineEventRepo;
use taskhub_db::DbPool;

/// Append a timeline event for `project_id`, logging a warning on failure
/// instead of propagating it.
pub async fn record(
    pool: &DbPool,
    project_id: DbId,
    user_id: DbId,
    event_type: &str,
    description: &str,
) {
    if let Err(e) = TimelineEventRepo::create(pool, project_id, user_id, event_type, description).await
    {
        tracing::warn!(
            error = %e,
            project_id,
            event_type,
            "Failed to record timeline event"
        );
    }
}
