//! Extractors and layers applied before a handler runs.
//!
//! - [`auth`]: [`auth::AuthUser`] verifies the bearer token and yields its claims
//! - [`role`]: [`role::RequireAdmin`] additionally requires the privileged role
//! - [`cors`]: the CORS layer built from [`rolekeeper_config::CorsConfig`]
//!
//! # Flow
//!
//! 1. Client sends `Authorization: <scheme> <token>`
//! 2. `AuthUser` verifies the token (428 on any failure)
//! 3. `RequireAdmin` checks the role (403 when not privileged)
//! 4. Only then is the request body decoded and the operation called
//!
//! ```ignore
//! async fn handler(RequireAdmin(auth_user): RequireAdmin) -> impl IntoResponse {
//!     // only administrators reach this point
//! }
//! ```

pub mod auth;
pub mod cors;
pub mod role;
