//! Authentication route handlers
//!
//! - Registration and login
//! - Admin listing of accounts

pub mod login;
pub mod register;
pub mod users;

pub use login::login;
pub use register::register;
pub use users::list_users;
