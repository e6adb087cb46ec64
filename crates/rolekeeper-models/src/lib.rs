//! # Rolekeeper Models
//!
//! Domain models and DTOs for the Rolekeeper API.
//!
//! - [`users`]: the user record with its resolved role, and the create/update bodies
//! - [`roles`]: the role record
//!
//! Field names match the JSON wire format (`user_name`, `role_name`, `role_id`,
//! `create_time`) so the same types serve as request bodies, response payloads and
//! database rows.

pub mod roles;
pub mod users;

pub use roles::Role;
pub use users::{NewUser, UnresolvedRole, User, UserRow, UserUpdate};
