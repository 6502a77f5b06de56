//! Configuration for the token service

use sm_shared::config::JwtConfig;

use crate::domain::entities::token::{DEFAULT_SESSION_EXPIRY_SECONDS, JWT_AUDIENCE, JWT_ISSUER};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub expiry_seconds: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            expiry_seconds: DEFAULT_SESSION_EXPIRY_SECONDS,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            expiry_seconds: config.expiry_seconds,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}
