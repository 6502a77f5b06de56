//! Session token claims for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::user::Role;

/// Default session lifetime (7 days)
pub const DEFAULT_SESSION_EXPIRY_SECONDS: i64 = 604_800;

/// JWT issuer
pub const JWT_ISSUER: &str = "student-records";

/// JWT audience
pub const JWT_AUDIENCE: &str = "student-records-api";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    pub email: String,

    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    pub iss: String,

    pub aud: String,
}

impl Claims {
    /// Creates claims for a session token valid for `expiry_seconds` from now
    pub fn new(user_id: i64, email: impl Into<String>, role: Role, expiry_seconds: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_seconds);

        Self {
            sub: user_id.to_string(),
            email: email.into(),
            role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
        }
    }

    /// Overrides issuer and audience
    pub fn with_issuer(mut self, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        self.iss = issuer.into();
        self.aud = audience.into();
        self
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
