//! Error types for authentication, session tokens and input validation
//!
//! User-facing wording lives in the presentation layer; these variants
//! only carry what the handler needs to pick a response.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authorization header missing or malformed")]
    MissingToken,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Session token errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required")]
    AllFieldsRequired,

    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Unsupported file type: {content_type}")]
    UnsupportedFileType { content_type: String },

    #[error("{field} is too long (max {max} characters)")]
    TooLong { field: String, max: usize },

    #[error("File too large (max {max_bytes} bytes)")]
    FileTooLarge { max_bytes: usize },
}
