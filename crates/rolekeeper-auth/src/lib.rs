//! # Rolekeeper Auth
//!
//! Bearer token verification and the access policy for the Rolekeeper API.
//!
//! This crate provides:
//!
//! - [`claims`]: the identity/role pair carried by a verified token
//! - [`jwt`]: `Authorization` header parsing and HMAC signature verification
//! - [`policy`]: the privileged-role check guarding administrative operations
//!
//! Tokens are issued elsewhere. This crate only verifies them, and every failure along
//! the way is reported as [`rolekeeper_core::ErrorKind::PreconditionRequired`].
//!
//! # Example
//!
//! ```ignore
//! use rolekeeper_auth::{authorize, extract_claims};
//! use rolekeeper_config::{AccessConfig, JwtConfig};
//!
//! let claims = extract_claims(Some("Bearer eyJ..."), &JwtConfig::from_env())?;
//! authorize(&AccessConfig::from_env().admin_role, &claims.role)?;
//! ```

pub mod claims;
pub mod jwt;
pub mod policy;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{ClaimsError, bearer_token, extract_claims, verify_token};
pub use policy::{authorize, is_privileged};
