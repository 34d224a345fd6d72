//! Timeline event-type constants.
//!
//! Every mutating API action appends one `timeline_events` row tagged with
//! one of these types. Kept in `core` so both the repository layer and any
//! future worker tooling use the same names.

/// Known event types for timeline entries.
pub mod event_types {
    pub const PROJECT_CREATED: &str = "project_created";
    pub const PROJECT_UPDATED: &str = "project_updated";
    pub const TASK_CREATED: &str = "task_created";
    pub const TASK_UPDATED: &str = "task_updated";
    pub const TASK_DELETED: &str = "task_deleted";
    pub const TASK_ASSIGNED: &str = "task_assigned";
    pub const DOCUMENT_UPLOADED: &str = "document_uploaded";
    pub const COMMENT_ADDED: &str = "comment_added";
}
