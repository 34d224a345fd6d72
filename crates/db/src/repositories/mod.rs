mod comment_repo;
mod document_repo;
mod notification_repo;
mod project_repo;
mod revoked_token_repo;
mod task_repo;
mod timeline_event_repo;
mod user_repo;

pub use comment_repo::CommentRepo;
pub use document_repo::DocumentRepo;
pub use notification_repo::NotificationRepo;
pub use project_repo::ProjectRepo;
pub use revoked_token_repo::RevokedTokenRepo;
pub use task_repo::TaskRepo;
pub use timeline_event_repo::TimelineEventRepo;
pub use user_repo::UserRepo;
