//! Instrumenting decorator: request count and latency per operation.

use std::time::Instant;

use async_trait::async_trait;

use rolekeeper_core::AppError;
use rolekeeper_models::{NewUser, Role, User, UserUpdate};

use crate::metrics::RequestMetrics;
use crate::modules::users::model::Operation;
use crate::modules::users::service::UserOperations;

/// Counts every call and records its duration, both labelled with the operation name
/// and whether it failed. Owns its metrics handle.
pub struct Instrumenting<S> {
    next: S,
    metrics: RequestMetrics,
}

impl<S> Instrumenting<S> {
    pub fn new(next: S, metrics: RequestMetrics) -> Self {
        Self { next, metrics }
    }

    fn observe<T>(&self, operation: Operation, began: Instant, result: &Result<T, AppError>) {
        self.metrics
            .record(operation.as_str(), result.is_err(), began.elapsed());
    }
}

#[async_trait]
impl<S: UserOperations> UserOperations for Instrumenting<S> {
    async fn get_roles(&self) -> Result<Vec<Role>, AppError> {
        let began = Instant::now();
        let result = self.next.get_roles().await;
        self.observe(Operation::GetRoles, began, &result);
        result
    }

    async fn get_user(&self, user_name: &str, role: Option<&str>) -> Result<User, AppError> {
        let began = Instant::now();
        let result = self.next.get_user(user_name, role).await;
        self.observe(Operation::GetUser, began, &result);
        result
    }

    async fn get_users_role(&self) -> Result<Vec<User>, AppError> {
        let began = Instant::now();
        let result = self.next.get_users_role().await;
        self.observe(Operation::GetUsersRole, began, &result);
        result
    }

    async fn add_user(&self, user: NewUser) -> Result<(), AppError> {
        let began = Instant::now();
        let result = self.next.add_user(user).await;
        self.observe(Operation::AddUser, began, &result);
        result
    }

    async fn update_user(&self, update: UserUpdate) -> Result<(), AppError> {
        let began = Instant::now();
        let result = self.next.update_user(update).await;
        self.observe(Operation::UpdateUser, began, &result);
        result
    }

    async fn delete_user(&self, user_name: &str) -> Result<(), AppError> {
        let began = Instant::now();
        let result = self.next.delete_user(user_name).await;
        self.observe(Operation::DeleteUser, began, &result);
        result
    }
}
