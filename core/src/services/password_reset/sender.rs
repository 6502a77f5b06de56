//! Out-of-band delivery of reset tokens

use async_trait::async_trait;

use crate::errors::DomainError;

/// Delivers a freshly issued reset token to the account owner
#[async_trait]
pub trait ResetLinkSender: Send + Sync {
    async fn send_reset_link(&self, email: &str, token: &str) -> Result<(), DomainError>;
}
