//! Authentication and password handling configuration

use serde::{Deserialize, Serialize};

use super::environment::Environment;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Session token expiry time in seconds
    pub expiry_seconds: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            expiry_seconds: 604800, // 7 days
            issuer: String::from("student-records"),
            audience: String::from("student-records-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set session token expiry in days
    pub fn with_expiry_days(mut self, days: i64) -> Self {
        self.expiry_seconds = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Password hashing and reset configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,

    /// Lifetime of a password reset token in minutes
    pub reset_token_ttl_minutes: i64,

    /// Return the raw reset token in the forgot-password response.
    /// Only meant for local development without a mail relay.
    #[serde(default)]
    pub expose_reset_token: bool,
}

impl PasswordConfig {
    /// bcrypt only accepts costs from 4 to 31
    pub fn has_valid_bcrypt_cost(&self) -> bool {
        (4..=31).contains(&self.bcrypt_cost)
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 10,
            reset_token_ttl_minutes: 15,
            expose_reset_token: false,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    ///
    /// `PASSWORD_RESET_EXPOSE_TOKEN` defaults to on in development only.
    pub fn from_env(environment: Environment) -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        let expiry_seconds = std::env::var("JWT_EXPIRY_SECONDS")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .unwrap_or(604800);
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);
        let reset_token_ttl_minutes = std::env::var("PASSWORD_RESET_TTL_MINUTES")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .unwrap_or(15);
        let expose_reset_token = std::env::var("PASSWORD_RESET_EXPOSE_TOKEN")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or_else(|| environment.is_development());

        Self {
            jwt: JwtConfig {
                secret: jwt_secret,
                expiry_seconds,
                ..Default::default()
            },
            password: PasswordConfig {
                bcrypt_cost,
                reset_token_ttl_minutes,
                expose_reset_token,
            },
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
