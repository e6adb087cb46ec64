//! Logging decorator: one structured event per operation call.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, warn};

use rolekeeper_core::AppError;
use rolekeeper_models::{NewUser, Role, User, UserUpdate};

use crate::modules::users::model::Operation;
use crate::modules::users::service::UserOperations;

/// Records the operation name, the affected user, the elapsed time and the error (if
/// any) after the inner call returns. Results pass through untouched.
pub struct Logging<S> {
    next: S,
}

impl<S> Logging<S> {
    pub fn new(next: S) -> Self {
        Self { next }
    }
}

fn log_call(operation: Operation, user: Option<&str>, began: Instant, error: Option<&AppError>) {
    let took_ms = began.elapsed().as_millis() as u64;
    match error {
        Some(err) => warn!(
            method = %operation,
            user = user,
            took_ms,
            kind = %err.kind,
            error = %err.error,
            "Operation failed"
        ),
        None => info!(method = %operation, user = user, took_ms, "Operation completed"),
    }
}

#[async_trait]
impl<S: UserOperations> UserOperations for Logging<S> {
    async fn get_roles(&self) -> Result<Vec<Role>, AppError> {
        let began = Instant::now();
        let result = self.next.get_roles().await;
        log_call(Operation::GetRoles, None, began, result.as_ref().err());
        result
    }

    async fn get_user(&self, user_name: &str, role: Option<&str>) -> Result<User, AppError> {
        let began = Instant::now();
        let result = self.next.get_user(user_name, role).await;
        log_call(Operation::GetUser, Some(user_name), began, result.as_ref().err());
        result
    }

    async fn get_users_role(&self) -> Result<Vec<User>, AppError> {
        let began = Instant::now();
        let result = self.next.get_users_role().await;
        log_call(Operation::GetUsersRole, None, began, result.as_ref().err());
        result
    }

    async fn add_user(&self, user: NewUser) -> Result<(), AppError> {
        let user_name = user.user_name.clone();
        let began = Instant::now();
        let result = self.next.add_user(user).await;
        log_call(Operation::AddUser, Some(&user_name), began, result.as_ref().err());
        result
    }

    async fn update_user(&self, update: UserUpdate) -> Result<(), AppError> {
        let user_name = update.user_name.clone();
        let began = Instant::now();
        let result = self.next.update_user(update).await;
        log_call(Operation::UpdateUser, Some(&user_name), began, result.as_ref().err());
        result
    }

    async fn delete_user(&self, user_name: &str) -> Result<(), AppError> {
        let began = Instant::now();
        let result = self.next.delete_user(user_name).await;
        log_call(Operation::DeleteUser, Some(user_name), began, result.as_ref().err());
        result
    }
}
