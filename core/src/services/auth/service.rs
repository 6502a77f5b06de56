//! Main authentication service implementation

use std::sync::Arc;

use sm_shared::utils::validation::{is_valid_email, mask_email, normalize_email, not_empty};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::user::{NewUser, PublicUser, Role};
use crate::domain::value_objects::LoginResult;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::PasswordHasher;

/// Authentication service for registration, login and account listing
pub struct AuthService<U>
where
    U: UserRepository,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for session tokens
    token_service: Arc<TokenService>,
    hasher: PasswordHasher,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT session tokens
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            hasher: PasswordHasher::new(config.bcrypt_cost),
        }
    }

    /// Register a new account with the `user` role
    ///
    /// # Returns
    ///
    /// * `Ok(PublicUser)` - The stored account
    /// * `Err(ValidationError::AllFieldsRequired)` - A field is missing or blank
    /// * `Err(ValidationError::InvalidEmail)` - Email is not plausibly valid
    /// * `Err(DomainError::Conflict)` - Email already registered
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<PublicUser> {
        if !not_empty(name) || !not_empty(email) || !not_empty(password) {
            return Err(ValidationError::AllFieldsRequired.into());
        }

        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let password_hash = self.hasher.hash(password).await?;

        let user = self
            .user_repository
            .create(NewUser {
                name: name.trim().to_string(),
                email,
                password_hash,
                role: Role::User,
            })
            .await?;

        tracing::info!(user_id = user.id, email = %mask_email(&user.email), "User registered");
        Ok(user.to_public())
    }

    /// Log in with email and password
    ///
    /// Unknown email and wrong password fail with the same
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResult> {
        if !not_empty(email) || password.is_empty() {
            return Err(AuthError::InvalidCredentials.into());
        }

        let email = normalize_email(email);
        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::debug!(email = %mask_email(&email), "Login for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            tracing::debug!(user_id = user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.token_service.issue(user.id, &user.email, user.role)?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(LoginResult {
            token,
            user: user.to_public(),
        })
    }

    /// List every account; only administrators may do this
    pub async fn list_users(&self, identity: &Identity) -> DomainResult<Vec<PublicUser>> {
        if !identity.is_admin() {
            return Err(DomainError::Auth(AuthError::InsufficientPermissions));
        }

        let users = self.user_repository.list().await?;
        Ok(users.iter().map(|u| u.to_public()).collect())
    }
}
