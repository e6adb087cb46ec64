use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use rolekeeper_auth::{Claims, extract_claims};
use rolekeeper_core::AppError;

use crate::state::AppState;

/// Extractor that verifies the bearer token and provides the caller's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn role(&self) -> &str {
        &self.0.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let claims = extract_claims(auth_header, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
