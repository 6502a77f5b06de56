//! In-memory implementation of UserRepository for tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

use super::trait_::UserRepository;

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

/// Mock user repository backed by a map behind a single lock, so the
/// conditional reset update is atomic like its SQL counterpart.
#[derive(Clone, Default)]
pub struct MockUserRepository {
    state: Arc<RwLock<State>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the expiry of a pending reset token, for expiry tests
    pub async fn set_reset_expiry(&self, email: &str, expires_at: DateTime<Utc>) {
        let mut state = self.state.write().await;
        if let Some(user) = state.users.values_mut().find(|u| u.email == email) {
            user.reset_token_expiry = Some(expires_at);
        }
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict {
                message: "Email already exists".to_string(),
            });
        }

        state.next_id += 1;
        let stored = User {
            id: state.next_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            reset_token: None,
            reset_token_expiry: None,
            created_at: Utc::now(),
        };
        state.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.values().rev().cloned().collect())
    }

    async fn set_reset_token(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.users.values_mut().find(|u| u.email == email) {
            Some(user) => {
                user.reset_token = Some(token.to_string());
                user.reset_token_expiry = Some(expires_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn reset_password(
        &self,
        token: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let matched = state.users.values_mut().find(|u| {
            u.reset_token.as_deref() == Some(token)
                && u.reset_token_expiry.map(|exp| exp > now).unwrap_or(false)
        });

        match matched {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.reset_token = None;
                user.reset_token_expiry = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
