//! Framework-free domain types shared by the database and API layers.

pub mod error;
pub mod ratelimit;
pub mod roles;
pub mod timeline;
pub mod types;
