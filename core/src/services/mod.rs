//! Business services containing domain logic and use cases.

pub mod assistant;
pub mod auth;
pub mod password_reset;
pub mod student;
pub mod token;

// Re-export commonly used types
pub use assistant::{AssistantClient, AssistantReply, AssistantRequest, AssistantService};
pub use auth::{AuthService, AuthServiceConfig, PasswordHasher};
pub use password_reset::{PasswordResetConfig, PasswordResetService, ResetLinkSender};
pub use student::{ImageStorage, StudentService, StudentServiceConfig};
pub use token::{TokenService, TokenServiceConfig};
