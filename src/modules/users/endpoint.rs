//! Endpoint adapters: a typed request in, an envelope out.
//!
//! Each request type names its payload type, so a handler cannot pair a request with
//! the wrong response shape. The adapters contain no business logic; they call one
//! operation and wrap its result.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use rolekeeper_core::AppError;

use crate::modules::users::model::{
    Ack, AddUserRequest, DeleteUserRequest, Envelope, GetRolesRequest, GetUserRequest,
    GetUsersRoleRequest, Operation, RolesPayload, UpdateUserRequest, UserPayload, UsersPayload,
};
use crate::modules::users::service::UserOperations;

#[async_trait]
pub trait Endpoint: Send + Sized + 'static {
    type Payload: Serialize + Send;

    const OPERATION: Operation;

    async fn call(self, operations: &dyn UserOperations) -> Result<Self::Payload, AppError>;
}

/// Runs `request` against `operations` and wraps the outcome.
pub async fn serve<E: Endpoint>(operations: &dyn UserOperations, request: E) -> Envelope<E::Payload> {
    debug!(operation = %E::OPERATION, "Dispatching request");
    request.call(operations).await.into()
}

#[async_trait]
impl Endpoint for GetRolesRequest {
    type Payload = RolesPayload;
    const OPERATION: Operation = Operation::GetRoles;

    async fn call(self, operations: &dyn UserOperations) -> Result<RolesPayload, AppError> {
        let roles = operations.get_roles().await?;
        Ok(RolesPayload { roles })
    }
}

#[async_trait]
impl Endpoint for GetUserRequest {
    type Payload = UserPayload;
    const OPERATION: Operation = Operation::GetUser;

    async fn call(self, operations: &dyn UserOperations) -> Result<UserPayload, AppError> {
        let user = operations
            .get_user(&self.user_name, self.role.as_deref())
            .await?;
        Ok(UserPayload { user })
    }
}

#[async_trait]
impl Endpoint for GetUsersRoleRequest {
    type Payload = UsersPayload;
    const OPERATION: Operation = Operation::GetUsersRole;

    async fn call(self, operations: &dyn UserOperations) -> Result<UsersPayload, AppError> {
        let users = operations.get_users_role().await?;
        Ok(UsersPayload { users })
    }
}

#[async_trait]
impl Endpoint for AddUserRequest {
    type Payload = Ack;
    const OPERATION: Operation = Operation::AddUser;

    async fn call(self, operations: &dyn UserOperations) -> Result<Ack, AppError> {
        operations.add_user(self.user).await?;
        Ok(Ack {})
    }
}

#[async_trait]
impl Endpoint for UpdateUserRequest {
    type Payload = Ack;
    const OPERATION: Operation = Operation::UpdateUser;

    async fn call(self, operations: &dyn UserOperations) -> Result<Ack, AppError> {
        operations.update_user(self.update).await?;
        Ok(Ack {})
    }
}

#[async_trait]
impl Endpoint for DeleteUserRequest {
    type Payload = Ack;
    const OPERATION: Operation = Operation::DeleteUser;

    async fn call(self, operations: &dyn UserOperations) -> Result<Ack, AppError> {
        operations.delete_user(&self.user_name).await?;
        Ok(Ack {})
    }
}
