//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod student_context;

// Re-export commonly used types
pub use auth_response::{ForgotPasswordOutcome, LoginResult};
pub use student_context::{ChatMessage, StudentContext};
