//! User repository trait defining the interface for credential persistence.
//!
//! Implementations own the atomicity of the password reset: issuing a token is
//! one update, and redeeming it is one conditional update that matches the
//! token and an unexpired expiry while clearing both fields.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the stored row
    ///
    /// # Returns
    /// * `Ok(User)` - User created with its store-assigned id
    /// * `Err(DomainError::Conflict)` - Email already registered
    /// * `Err(DomainError)` - Database or other error occurred
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Find a user by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// List every user, newest first
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Store a reset token and its expiry on the user with `email`
    ///
    /// # Returns
    /// * `Ok(true)` - A user matched and now carries the token
    /// * `Ok(false)` - No user with that email
    async fn set_reset_token(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Redeem a reset token: in one conditional update, set `password_hash`
    /// and clear the token fields on the user whose token equals `token` and
    /// whose expiry is after `now`.
    ///
    /// # Returns
    /// * `Ok(true)` - Exactly one user updated
    /// * `Ok(false)` - Unknown, already consumed or expired token
    async fn reset_password(
        &self,
        token: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}
