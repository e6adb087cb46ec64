//! # Rolekeeper Config
//!
//! Configuration types for the Rolekeeper API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token verification secret
//! - [`access`]: privileged role literal and the default role for self-registration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: listen address and shutdown grace period
//! - [`logging`]: log level, format and optional log directory
//!
//! All values are read once at startup and are immutable afterwards.
//!
//! # Example
//!
//! ```ignore
//! use rolekeeper_config::{AccessConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let access_config = AccessConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod access;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod logging;
pub mod server;

mod env;

// Re-export commonly used types at crate root
pub use access::AccessConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
