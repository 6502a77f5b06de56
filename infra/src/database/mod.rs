//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and embedded migrations
//! - Repository implementations for users and students

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlStudentRepository, MySqlUserRepository};
