//! # Infrastructure Layer
//!
//! Concrete implementations of the seams defined in `sm_core`:
//! - **Database**: MySQL repositories using SQLx, connection pool and migrations
//! - **Storage**: uploaded student images on the local filesystem
//! - **Assistant**: HTTP chat backend client
//! - **Notify**: delivery of password reset tokens
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use sm_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

pub mod assistant;
pub mod notify;
pub mod storage;

pub use assistant::HttpAssistantClient;
pub use notify::LoggingResetLinkSender;
pub use storage::LocalImageStorage;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Internal {
            message: error.to_string(),
        }
    }
}
