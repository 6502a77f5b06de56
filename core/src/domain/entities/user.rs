//! User entity representing a registered account.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role granted to an account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account, the default on registration
    #[default]
    User,
    /// Administrator allowed to list accounts
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// User entity as stored in the credential store
///
/// Deliberately not `Serialize`: the password hash and reset fields must never
/// leave the service. Use [`PublicUser`] for anything sent outward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier
    pub id: i64,

    /// Display name
    pub name: String,

    /// Normalized (trimmed, lowercase) email, unique
    pub email: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    pub role: Role,

    /// Pending single-use reset token, set together with `reset_token_expiry`
    pub reset_token: Option<String>,

    pub reset_token_expiry: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Public projection of this user
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    /// Whether a reset token is pending and has not yet expired at `now`
    pub fn has_pending_reset(&self, now: DateTime<Utc>) -> bool {
        match (&self.reset_token, self.reset_token_expiry) {
            (Some(_), Some(expiry)) => expiry > now,
            _ => false,
        }
    }
}

/// Public user projection: `{id, name, email, role}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Data required to insert a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_user() -> User {
        User {
            id: 7,
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            password_hash: "$2b$10$hash".to_string(),
            role: Role::User,
            reset_token: None,
            reset_token_expiry: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_parsing_and_display() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" User ".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_public_projection_hides_secrets() {
        let mut user = sample_user();
        user.reset_token = Some("abc".to_string());

        let json = serde_json::to_value(user.to_public()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(object["id"], 7);
        assert_eq!(object["role"], "user");
        assert!(!object.contains_key("password_hash"));
        assert!(!object.contains_key("reset_token"));
    }

    #[test]
    fn test_has_pending_reset() {
        let now = Utc::now();
        let mut user = sample_user();
        assert!(!user.has_pending_reset(now));

        user.reset_token = Some("abc".to_string());
        user.reset_token_expiry = Some(now + Duration::minutes(15));
        assert!(user.has_pending_reset(now));
        assert!(!user.has_pending_reset(now + Duration::minutes(16)));
    }
}
