//! Reset link sender for deployments without a mail relay.
//!
//! Logs that a reset link was issued without logging the token itself; in
//! development the token reaches the caller through the API response instead.

use async_trait::async_trait;

use sm_core::errors::DomainError;
use sm_core::services::ResetLinkSender;
use sm_shared::utils::validation::mask_email;

#[derive(Debug, Clone, Default)]
pub struct LoggingResetLinkSender;

impl LoggingResetLinkSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResetLinkSender for LoggingResetLinkSender {
    async fn send_reset_link(&self, email: &str, _token: &str) -> Result<(), DomainError> {
        tracing::info!(email = %mask_email(email), "Password reset link issued");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_always_succeeds() {
        let sender = LoggingResetLinkSender::new();
        assert!(sender.send_reset_link("a@x.com", "token").await.is_ok());
    }
}
