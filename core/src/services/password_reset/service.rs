//! Password reset service implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::RngCore;

use sm_shared::utils::validation::{mask_email, normalize_email, not_empty};

use crate::domain::value_objects::ForgotPasswordOutcome;
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::auth::PasswordHasher;

use super::config::PasswordResetConfig;
use super::sender::ResetLinkSender;

/// Number of random bytes in a reset token (256 bits)
const RESET_TOKEN_BYTES: usize = 32;

/// Generate a hex-encoded 256-bit random reset token
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub struct PasswordResetService<U, N>
where
    U: UserRepository,
    N: ResetLinkSender,
{
    user_repository: Arc<U>,
    sender: Arc<N>,
    hasher: PasswordHasher,
    config: PasswordResetConfig,
}

impl<U, N> PasswordResetService<U, N>
where
    U: UserRepository,
    N: ResetLinkSender,
{
    pub fn new(user_repository: Arc<U>, sender: Arc<N>, config: PasswordResetConfig) -> Self {
        Self {
            user_repository,
            sender,
            hasher: PasswordHasher::new(config.bcrypt_cost),
            config,
        }
    }

    /// Issue a reset token for `email`.
    ///
    /// The outcome does not depend on whether the account exists: with token
    /// exposure enabled a token is returned either way, otherwise never.
    /// Delivery failures are logged and not reported to the caller.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<ForgotPasswordOutcome> {
        if !not_empty(email) {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }

        let email = normalize_email(email);
        let token = generate_reset_token();
        let expires_at = Utc::now() + Duration::minutes(self.config.token_ttl_minutes);

        let matched = self
            .user_repository
            .set_reset_token(&email, &token, expires_at)
            .await?;

        if matched {
            tracing::info!(email = %mask_email(&email), "Password reset token issued");
            if let Err(e) = self.sender.send_reset_link(&email, &token).await {
                tracing::warn!(email = %mask_email(&email), error = %e, "Failed to deliver reset link");
            }
        } else {
            tracing::debug!(email = %mask_email(&email), "Password reset requested for unknown email");
        }

        Ok(ForgotPasswordOutcome {
            reset_token: self.config.expose_token.then_some(token),
        })
    }

    /// Redeem a reset token and set a new password
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Password replaced, token consumed
    /// * `Err(ValidationError::AllFieldsRequired)` - Token or password missing
    /// * `Err(ValidationError::InvalidResetToken)` - Unknown, used or expired token
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<()> {
        if !not_empty(token) || !not_empty(new_password) {
            return Err(ValidationError::AllFieldsRequired.into());
        }

        let password_hash = self.hasher.hash(new_password).await?;

        let updated = self
            .user_repository
            .reset_password(token.trim(), &password_hash, Utc::now())
            .await?;

        if !updated {
            return Err(ValidationError::InvalidResetToken.into());
        }

        tracing::info!("Password reset completed");
        Ok(())
    }
}
