//! Test doubles for authentication service tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;
use crate::repositories::UserRepository;

/// User repository whose every call fails like a lost database connection
pub struct FailingUserRepository;

fn unavailable() -> DomainError {
    DomainError::internal("database unavailable")
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn create(&self, _user: NewUser) -> Result<User, DomainError> {
        Err(unavailable())
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, DomainError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Err(unavailable())
    }

    async fn set_reset_token(
        &self,
        _email: &str,
        _token: &str,
        _expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        Err(unavailable())
    }

    async fn reset_password(
        &self,
        _token: &str,
        _password_hash: &str,
        _now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        Err(unavailable())
    }
}
