use crate::env::var_or;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HMAC secret every bearer token must be signed with.
    pub secret: String,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| var_or("SECRET_KEY", "your-secret-key-change-in-production"));

        Self { secret }
    }
}
