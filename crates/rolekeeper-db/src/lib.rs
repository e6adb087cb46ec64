//! # Rolekeeper DB
//!
//! Database pool and migrations for the Rolekeeper API.
//!
//! # Example
//!
//! ```ignore
//! use rolekeeper_config::DatabaseConfig;
//! use rolekeeper_db::{init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env();
//! let pool = init_db_pool(&config).await?;
//! if config.run_migrations {
//!     run_migrations(&pool).await?;
//! }
//! ```

use rolekeeper_config::DatabaseConfig;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Opens a PostgreSQL connection pool.
///
/// The pool is cheaply cloneable and is shared by every request. It is created once
/// during startup.
///
/// # Errors
///
/// Returns the driver error when the URL is invalid or the first connection fails.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies the bundled migrations (`user_role`, `users` and the seeded roles).
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
