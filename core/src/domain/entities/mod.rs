//! Domain entities representing core business objects.

pub mod identity;
pub mod student;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use identity::Identity;
pub use student::{ImageUpload, NewStudent, Student, StudentForm, StudentWithOwner};
pub use token::{Claims, DEFAULT_SESSION_EXPIRY_SECONDS, JWT_AUDIENCE, JWT_ISSUER};
pub use user::{NewUser, PublicUser, Role, User};
