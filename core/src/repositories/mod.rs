//! Repository interfaces for data persistence.

pub mod student;
pub mod user;

pub use student::StudentRepository;
pub use user::UserRepository;

#[cfg(any(test, feature = "mock-repositories"))]
pub use student::MockStudentRepository;
#[cfg(any(test, feature = "mock-repositories"))]
pub use user::MockUserRepository;
