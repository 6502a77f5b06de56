//! Authenticated caller identity.

use serde::{Deserialize, Serialize};

use super::token::Claims;
use super::user::Role;

/// Immutable identity of an authenticated caller, decoded from a verified
/// session token and handed explicitly to every protected operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn new(id: i64, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Build an identity from verified claims; `None` if the subject is not a
    /// numeric user id.
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        let id = claims.sub.parse::<i64>().ok()?;
        Some(Self {
            id,
            email: claims.email.clone(),
            role: claims.role,
        })
    }
}
