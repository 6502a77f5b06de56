//! Authentication service module
//!
//! This module provides:
//! - Registration with bcrypt password hashing
//! - Login issuing a session token
//! - The admin-only account listing

mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::PasswordHasher;
pub use service::AuthService;
