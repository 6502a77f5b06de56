//! Client library for the student records API
//!
//! Stands in for the single-page frontend:
//! - [`Session`] and the [`SessionStore`] implementations keep the signed-in user
//! - [`guard`] decides whether a screen may be shown for the current session
//! - [`ApiClient`] calls the backend and attaches the bearer token

pub mod api;
pub mod error;
pub mod guard;
pub mod models;
pub mod session;


pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use guard::{guard, Navigation, Route};
pub use models::{AskReply, ChatMessage, ForgotPasswordReply, ImageFile, Student, StudentInput, User};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
