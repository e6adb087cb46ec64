//! Access policy configuration.
//!
//! - `ADMIN_ROLE`: role name granting access to protected operations (default: `administrator`)
//! - `DEFAULT_ROLE_ID`: role id assigned to every self-registered user (default: `3`)

use crate::env::{parse_or, var_or};

pub const DEFAULT_ADMIN_ROLE: &str = "administrator";
pub const DEFAULT_ROLE_ID: i32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessConfig {
    pub admin_role: String,
    pub default_role_id: i32,
}

impl AccessConfig {
    pub fn from_env() -> Self {
        Self {
            admin_role: var_or("ADMIN_ROLE", DEFAULT_ADMIN_ROLE),
            default_role_id: parse_or("DEFAULT_ROLE_ID", DEFAULT_ROLE_ID),
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            admin_role: DEFAULT_ADMIN_ROLE.to_string(),
            default_role_id: DEFAULT_ROLE_ID,
        }
    }
}
