//! # Rolekeeper Core
//!
//! Core error types for the Rolekeeper API.
//!
//! This crate provides the closed error taxonomy every other crate reports into:
//!
//! - [`errors`]: [`AppError`] and its [`ErrorKind`], plus the mapping from kind to
//!   HTTP status and the JSON error body
//!
//! # Example
//!
//! ```ignore
//! use rolekeeper_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("user alice not found"));
//! assert_eq!(error.status(), axum::http::StatusCode::NOT_FOUND);
//! ```

pub mod errors;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorBody, ErrorKind};
