//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of repository traits
//! using SQLx for database operations.

pub mod student_repository_impl;
pub mod user_repository_impl;

// Re-export the MySQL implementations
pub use student_repository_impl::MySqlStudentRepository;
pub use user_repository_impl::MySqlUserRepository;

use sm_core::errors::DomainError;

/// Wrap a SQLx failure as an internal error with context
pub(crate) fn db_error(context: &str, error: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}
