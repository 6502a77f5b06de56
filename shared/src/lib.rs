//! Shared utilities and common types for the student records server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response envelope
//! - Utility functions (email validation and masking)
//! - Common response types

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AssistantConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    PasswordConfig, ServerConfig, UploadConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, MessageResponse};
pub use utils::validation;
