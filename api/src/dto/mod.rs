//! Request and response bodies

pub mod assistant;
pub mod auth;
pub mod error;
pub mod password;

pub use error::{ErrorResponse, ErrorResponseExt};
