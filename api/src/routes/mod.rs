//! HTTP route handlers grouped by API scope

pub mod assistant;
pub mod auth;
pub mod password;
pub mod students;
