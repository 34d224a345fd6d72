//! User role constants and validation.
//!
//! The platform currently defines a single role; the allowed set is kept as
//! a slice so registration validation and any future roles share one source
//! of truth.

/// The default (and currently only) user role.
pub const ROLE_PROJECT_MANAGER: &str = "project_manager";

/// All roles accepted at registration.
pub const ALLOWED_ROLES: &[&str] = &[ROLE_PROJECT_MANAGER];

/// Whether `role` is a member of the allowed set.
pub fn is_valid_role(role: &str) -> bool {
    ALLOWED_ROLES.contains(&role)
}
