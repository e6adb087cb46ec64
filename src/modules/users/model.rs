//! Typed requests, response payloads and the envelope that carries them.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use rolekeeper_core::AppError;
use rolekeeper_models::{NewUser, Role, User, UserUpdate};

/// Every business operation the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetRoles,
    GetUser,
    GetUsersRole,
    AddUser,
    UpdateUser,
    DeleteUser,
}

impl Operation {
    /// Name used in logs and as the `method` metric label.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::GetRoles => "get_roles",
            Operation::GetUser => "get_user",
            Operation::GetUsersRole => "get_users_role",
            Operation::AddUser => "add_user",
            Operation::UpdateUser => "update_user",
            Operation::DeleteUser => "delete_user",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Requests

#[derive(Debug, Clone, Default)]
pub struct GetRolesRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetUserRequest {
    pub user_name: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetUsersRoleRequest;

#[derive(Debug, Clone)]
pub struct AddUserRequest {
    pub user: NewUser,
}

#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub update: UserUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteUserRequest {
    pub user_name: String,
}

/// Query string of `GET /user`. Without `user` the caller's own name is looked up.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Name of the user to fetch
    pub user: Option<String>,
    /// Only match when the user holds this role
    pub role: Option<String>,
}

// Payloads

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RolesPayload {
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserPayload {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsersPayload {
    pub users: Vec<User>,
}

/// Payload of the mutating operations: an empty JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ack {}

/// Outcome of one operation: its payload or the classified error, never both.
#[derive(Debug)]
pub struct Envelope<T> {
    result: Result<T, AppError>,
}

impl<T> Envelope<T> {
    pub fn payload(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&AppError> {
        self.result.as_ref().err()
    }
}

impl<T> From<Result<T, AppError>> for Envelope<T> {
    fn from(result: Result<T, AppError>) -> Self {
        Self { result }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        match self.result {
            Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
            Err(err) => err.into_response(),
        }
    }
}
