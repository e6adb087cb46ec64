use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use tracing::instrument;
use validator::Validate;

use rolekeeper_core::{AppError, ErrorBody, ErrorKind};
use rolekeeper_models::{NewUser, UserUpdate};

use crate::middleware::role::RequireAdmin;
use crate::modules::users::endpoint::serve;
use crate::modules::users::model::{
    Ack, AddUserRequest, DeleteUserRequest, Envelope, GetRolesRequest, GetUserRequest,
    GetUsersRoleRequest, RolesPayload, UpdateUserRequest, UserPayload, UserQuery, UsersPayload,
};
use crate::state::AppState;

const DECODE_FAILURE: &str = "failed to decode request";

fn decode_failure<E>(rejection: E) -> AppError
where
    E: std::error::Error + Send + Sync + 'static,
{
    AppError::internal(anyhow::Error::new(rejection).context(DECODE_FAILURE))
}

/// Rejects bodies that decode but name no user.
fn validated<T: Validate>(body: T) -> Result<T, AppError> {
    body.validate().map_err(|e| {
        AppError::inconsistent_ids(
            anyhow::Error::new(e).context(ErrorKind::InconsistentIds.default_message()),
        )
    })?;
    Ok(body)
}

/// List all roles
#[utoipa::path(
    get,
    path = "/roles",
    responses(
        (status = 200, description = "All roles", body = RolesPayload),
        (status = 403, description = "Caller is not an administrator", body = ErrorBody),
        (status = 428, description = "Missing or invalid authorization header", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
#[instrument(skip_all)]
pub async fn get_roles(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Envelope<RolesPayload> {
    serve(state.operations.as_ref(), GetRolesRequest).await
}

/// Get one user with its resolved role
#[utoipa::path(
    get,
    path = "/user",
    params(UserQuery),
    responses(
        (status = 200, description = "The user", body = UserPayload),
        (status = 403, description = "Caller is not an administrator", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 428, description = "Missing or invalid authorization header", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(auth_user): RequireAdmin,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Envelope<UserPayload>, AppError> {
    let Query(query) = query.map_err(decode_failure)?;
    let request = GetUserRequest {
        user_name: query.user.unwrap_or(auth_user.0.username),
        role: query.role,
    };

    Ok(serve(state.operations.as_ref(), request).await)
}

/// List every user with its resolved role
#[utoipa::path(
    get,
    path = "/usersrole",
    responses(
        (status = 200, description = "All users", body = UsersPayload),
        (status = 403, description = "Caller is not an administrator", body = ErrorBody),
        (status = 428, description = "Missing or invalid authorization header", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_users_role(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Envelope<UsersPayload> {
    serve(state.operations.as_ref(), GetUsersRoleRequest).await
}

/// Register a user. Open to any caller; the user always gets the default role.
#[utoipa::path(
    post,
    path = "/user",
    request_body = NewUser,
    responses(
        (status = 200, description = "User created", body = Ack),
        (status = 400, description = "Empty or duplicate user name", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn add_user(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<Envelope<Ack>, AppError> {
    let Json(user) = body.map_err(decode_failure)?;
    let request = AddUserRequest {
        user: validated(user)?,
    };

    Ok(serve(state.operations.as_ref(), request).await)
}

/// Change a user's role
#[utoipa::path(
    put,
    path = "/user",
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated", body = Ack),
        (status = 400, description = "Empty user name or unknown role id", body = ErrorBody),
        (status = 403, description = "Caller is not an administrator", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 428, description = "Missing or invalid authorization header", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    body: Result<Json<UserUpdate>, JsonRejection>,
) -> Result<Envelope<Ack>, AppError> {
    let Json(update) = body.map_err(decode_failure)?;
    let request = UpdateUserRequest {
        update: validated(update)?,
    };

    Ok(serve(state.operations.as_ref(), request).await)
}

/// Delete a user by name
#[utoipa::path(
    delete,
    path = "/user/{user}",
    params(("user" = String, Path, description = "Name of the user to delete")),
    responses(
        (status = 200, description = "User deleted", body = Ack),
        (status = 403, description = "Caller is not an administrator", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 428, description = "Missing or invalid authorization header", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    user: Result<Path<String>, PathRejection>,
) -> Result<Envelope<Ack>, AppError> {
    let Path(user_name) = user.map_err(|rejection| {
        AppError::bad_routing(
            anyhow::Error::new(rejection).context(ErrorKind::BadRouting.default_message()),
        )
    })?;

    Ok(serve(state.operations.as_ref(), DeleteUserRequest { user_name }).await)
}
