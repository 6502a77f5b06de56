//! Configuration for the authentication service

use sm_shared::config::PasswordConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt work factor used for new hashes
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 10,
        }
    }
}

impl From<&PasswordConfig> for AuthServiceConfig {
    fn from(config: &PasswordConfig) -> Self {
        Self {
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
