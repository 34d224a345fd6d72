//! HTTP request handlers, one module per resource.

pub mod comment;
pub mod document;
pub mod notification;
pub mod project;
pub mod task;
pub mod timeline;
pub mod users;
