//! Role-based authorization for administrative routes.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use rolekeeper_auth::authorize;
use rolekeeper_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Extractor that only succeeds for callers holding the configured admin role.
///
/// Authentication runs first, so a bad token is still reported as 428 rather than 403.
///
/// ```rust,ignore
/// async fn delete_user(RequireAdmin(auth_user): RequireAdmin) -> impl IntoResponse {
///     // auth_user.role() matches the admin role, ignoring case
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        authorize(&state.access_config.admin_role, auth_user.role()).inspect_err(|_| {
            debug!(
                user = auth_user.username(),
                role = auth_user.role(),
                "Denied non-administrator"
            );
        })?;

        Ok(RequireAdmin(auth_user))
    }
}
