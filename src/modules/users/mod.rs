//! User and role administration.
//!
//! Requests flow `controller` → `endpoint` → decorated [`service::UserOperations`]:
//!
//! ```text
//! Instrumenting → Logging → PgUserService
//! ```

pub mod controller;
pub mod endpoint;
pub mod instrumenting;
pub mod logging;
pub mod model;
pub mod router;
pub mod service;
