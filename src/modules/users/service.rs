//! The user/role operations and their PostgreSQL implementation.

use std::sync::Arc;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rolekeeper_core::{AppError, ErrorKind};
use rolekeeper_models::{NewUser, Role, User, UserRow, UserUpdate};

use crate::metrics::RequestMetrics;
use crate::modules::users::instrumenting::Instrumenting;
use crate::modules::users::logging::Logging;

/// The business operations behind every route.
///
/// The store implementation and each decorator implement this trait, so a decorated
/// stack is used exactly like the store itself.
#[async_trait]
pub trait UserOperations: Send + Sync {
    async fn get_roles(&self) -> Result<Vec<Role>, AppError>;

    /// Looks a user up by name. With `role` set, the user must also hold that role
    /// (compared case-insensitively) or the lookup is `NotFound`.
    async fn get_user(&self, user_name: &str, role: Option<&str>) -> Result<User, AppError>;

    async fn get_users_role(&self) -> Result<Vec<User>, AppError>;

    /// Registers a user with the default role.
    async fn add_user(&self, user: NewUser) -> Result<(), AppError>;

    /// Moves an existing user to another role and stamps `create_time`.
    async fn update_user(&self, update: UserUpdate) -> Result<(), AppError>;

    async fn delete_user(&self, user_name: &str) -> Result<(), AppError>;
}

/// Wraps `operations` in the decorator chain, outermost first:
/// instrumenting, then logging, then the operations themselves.
pub fn decorate<S>(operations: S, metrics: RequestMetrics) -> Arc<dyn UserOperations>
where
    S: UserOperations + 'static,
{
    let logged = Logging::new(operations);
    let instrumented = Instrumenting::new(logged, metrics);
    Arc::new(instrumented)
}

/// The production stack: the PostgreSQL store behind the decorator chain.
pub fn build_user_operations(
    db: PgPool,
    default_role_id: i32,
    metrics: RequestMetrics,
) -> Arc<dyn UserOperations> {
    decorate(PgUserService::new(db, default_role_id), metrics)
}

const USER_COLUMNS: &str = r#"
    SELECT users.user_name, ur.role_name, ur.id AS role_id, users.create_time::date AS create_time
    FROM users
    LEFT JOIN user_role ur ON ur.id = users.role
"#;

pub struct PgUserService {
    db: PgPool,
    default_role_id: i32,
}

impl PgUserService {
    pub fn new(db: PgPool, default_role_id: i32) -> Self {
        Self {
            db,
            default_role_id,
        }
    }
}

#[async_trait]
impl UserOperations for PgUserService {
    #[instrument(skip(self))]
    async fn get_roles(&self) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>("SELECT id, role_name FROM user_role ORDER BY id")
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch roles")
            .map_err(AppError::database)?;

        Ok(roles)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_name: &str, role: Option<&str>) -> Result<User, AppError> {
        let query = format!(
            "{USER_COLUMNS} WHERE users.user_name = $1 \
             AND ($2::text IS NULL OR lower(ur.role_name) = lower($2))"
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user_name)
            .bind(role)
            .fetch_optional(&self.db)
            .await
            .context("Failed to fetch user")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("User {} not found", user_name)))?;

        resolve(row)
    }

    #[instrument(skip(self))]
    async fn get_users_role(&self) -> Result<Vec<User>, AppError> {
        let query = format!("{USER_COLUMNS} ORDER BY users.user_name");

        let rows = sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch users")
            .map_err(AppError::database)?;

        rows.into_iter().map(resolve).collect()
    }

    #[instrument(skip(self))]
    async fn add_user(&self, user: NewUser) -> Result<(), AppError> {
        sqlx::query("INSERT INTO users (user_name, role, create_time) VALUES ($1, $2, NOW())")
            .bind(&user.user_name)
            .bind(self.default_role_id)
            .execute(&self.db)
            .await
            .map_err(|e| classify(e, "Failed to insert user"))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_user(&self, update: UserUpdate) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE users SET role = $2, create_time = NOW() WHERE user_name = $1")
                .bind(&update.user_name)
                .bind(update.role_id)
                .execute(&self.db)
                .await
                .map_err(|e| classify(e, "Failed to update user"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!(
                "User {} not found",
                update.user_name
            )));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_name: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE user_name = $1")
            .bind(user_name)
            .execute(&self.db)
            .await
            .context("Failed to delete user")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User {} not found", user_name)));
        }

        Ok(())
    }
}

/// A row whose role does not resolve is a result-mapping failure, never a default.
fn resolve(row: UserRow) -> Result<User, AppError> {
    User::try_from(row)
        .context("Failed to map user record")
        .map_err(AppError::internal)
}

fn classify(err: sqlx::Error, summary: &'static str) -> AppError {
    let (unique, foreign_key) = match &err {
        sqlx::Error::Database(db_err) => (
            db_err.is_unique_violation(),
            db_err.is_foreign_key_violation(),
        ),
        _ => (false, false),
    };

    let err = anyhow::Error::from(err);
    if unique {
        AppError::already_exists(err.context(ErrorKind::AlreadyExists.default_message()))
    } else if foreign_key {
        AppError::inconsistent_ids(err.context(ErrorKind::InconsistentIds.default_message()))
    } else {
        AppError::database(err.context(summary))
    }
}
