//! Configuration for the password reset service

use sm_shared::config::PasswordConfig;

#[derive(Debug, Clone)]
pub struct PasswordResetConfig {
    /// Minutes a reset token stays redeemable
    pub token_ttl_minutes: i64,
    /// Return the raw token to the caller instead of only sending it
    pub expose_token: bool,
    /// bcrypt work factor for the new password
    pub bcrypt_cost: u32,
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            token_ttl_minutes: 15,
            expose_token: false,
            bcrypt_cost: 10,
        }
    }
}

impl From<&PasswordConfig> for PasswordResetConfig {
    fn from(config: &PasswordConfig) -> Self {
        Self {
            token_ttl_minutes: config.reset_token_ttl_minutes,
            expose_token: config.expose_reset_token,
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
