//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `assistant` - Chat backend used by the assistant endpoint
//! - `auth` - Session token and password handling
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `server` - HTTP server and CORS configuration
//! - `upload` - Image upload limits and storage location

pub mod assistant;
pub mod auth;
pub mod database;
pub mod environment;
pub mod server;
pub mod upload;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use assistant::AssistantConfig;
pub use auth::{AuthConfig, JwtConfig, PasswordConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::{CorsConfig, ServerConfig};
pub use upload::UploadConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Upload configuration
    #[serde(default)]
    pub upload: UploadConfig,

    /// Assistant configuration
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            upload: UploadConfig::default(),
            assistant: AssistantConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(environment),
            upload: UploadConfig::from_env(),
            assistant: AssistantConfig::from_env(),
            cors: CorsConfig::from_env(),
        }
    }

    /// Check the configuration for settings that must not reach production.
    ///
    /// Returns a description of every problem found; an empty list means
    /// the configuration is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            problems.push("JWT_SECRET must be set in production".to_string());
        }
        if self.environment.is_production() && self.auth.password.expose_reset_token {
            problems.push("PASSWORD_RESET_EXPOSE_TOKEN must be disabled in production".to_string());
        }
        if !self.auth.password.has_valid_bcrypt_cost() {
            problems.push(format!(
                "BCRYPT_COST must be between 4 and 31, got {}",
                self.auth.password.bcrypt_cost
            ));
        }
        problems
    }

    /// Whether startup must be refused in this environment.
    ///
    /// Production refuses any problem. An out-of-range bcrypt cost is
    /// refused everywhere since no password could be hashed with it.
    pub fn must_refuse_start(&self) -> bool {
        if self.is_production() && !self.validate().is_empty() {
            return true;
        }
        !self.auth.password.has_valid_bcrypt_cost()
    }

    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_outside_production() {
        let config = AppConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_production_rejects_default_secret_and_exposed_tokens() {
        let mut config = AppConfig::default();
        config.environment = Environment::Production;
        config.auth.password.expose_reset_token = true;

        let problems = config.validate();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("JWT_SECRET"));
        assert!(problems[1].contains("PASSWORD_RESET_EXPOSE_TOKEN"));
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let mut config = AppConfig::default();
        config.auth.password.bcrypt_cost = 2;
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_invalid_bcrypt_cost_refused_in_every_environment() {
        for environment in [
            Environment::Development,
            Environment::Staging,
            Environment::Production,
        ] {
            let mut config = AppConfig::default();
            config.environment = environment;
            config.auth.jwt.secret = "a-real-secret".to_string();
            config.auth.password.expose_reset_token = false;

            config.auth.password.bcrypt_cost = 32;
            assert!(config.must_refuse_start(), "{:?}", environment);

            config.auth.password.bcrypt_cost = 10;
            assert!(!config.must_refuse_start(), "{:?}", environment);
        }
    }

    #[test]
    fn test_production_problems_refuse_start() {
        let mut config = AppConfig::default();
        config.environment = Environment::Production;
        assert!(config.must_refuse_start());

        config.environment = Environment::Development;
        assert!(!config.must_refuse_start());
    }
}
