pub mod comment;
pub mod document;
pub mod notification;
pub mod project;
pub mod task;
pub mod timeline_event;
pub mod user;
