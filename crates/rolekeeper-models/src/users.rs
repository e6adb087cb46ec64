//! User records and request bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

/// A user together with the role it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub user_name: String,
    pub role_name: String,
    pub role_id: i32,
    /// Date of creation or of the last role change. Assigned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<NaiveDate>,
}

/// A `users` row left-joined with `user_role`.
///
/// The role columns are nullable in the join; converting into [`User`] fails when
/// they are, so a dangling role reference never reaches a response.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_name: String,
    pub role_name: Option<String>,
    pub role_id: Option<i32>,
    pub create_time: Option<NaiveDate>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("user {user_name} has no matching role")]
pub struct UnresolvedRole {
    pub user_name: String,
}

impl TryFrom<UserRow> for User {
    type Error = UnresolvedRole;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        match (row.role_name, row.role_id) {
            (Some(role_name), Some(role_id)) => Ok(User {
                user_name: row.user_name,
                role_name,
                role_id,
                create_time: row.create_time,
            }),
            _ => Err(UnresolvedRole {
                user_name: row.user_name,
            }),
        }
    }
}

/// Body of `POST /user`. Any role fields sent along are ignored; new users always get
/// the default role.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewUser {
    #[validate(length(
        min = 1,
        max = 255,
        message = "user_name must be between 1 and 255 characters"
    ))]
    pub user_name: String,
}

/// Body of `PUT /user`: move an existing user to another role.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserUpdate {
    #[validate(length(
        min = 1,
        max = 255,
        message = "user_name must be between 1 and 255 characters"
    ))]
    pub user_name: String,
    pub role_id: i32,
}
