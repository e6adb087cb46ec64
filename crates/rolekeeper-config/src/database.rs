//! PostgreSQL connection settings.
//!
//! `DATABASE_URL` wins when set. Otherwise the URL is assembled from `DB_HOST`,
//! `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`.

use crate::env::{flag, parse_or, var_or};

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            build_url(
                &var_or("DB_HOST", "localhost"),
                parse_or("DB_PORT", 5432),
                &var_or("DB_USER", "postgres"),
                &var_or("DB_PASSWORD", "pgpassword"),
                &var_or("DB_NAME", "rolekeeper"),
            )
        });

        Self {
            url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 5),
            run_migrations: flag("RUN_MIGRATIONS", false),
        }
    }
}

fn build_url(host: &str, port: u16, user: &str, password: &str, name: &str) -> String {
    format!("postgres://{user}:{password}@{host}:{port}/{name}?sslmode=disable")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        assert_eq!(
            build_url("db", 5433, "admin", "secret", "users"),
            "postgres://admin:secret@db:5433/users?sslmode=disable"
        );
    }
}
