//! Password reset route handlers

pub mod forgot_password;
pub mod reset_password;

pub use forgot_password::forgot_password;
pub use reset_password::reset_password;
