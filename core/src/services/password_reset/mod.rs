//! Password reset flow
//!
//! `forgot_password` stores a random single-use token with a short expiry and
//! hands it to a [`ResetLinkSender`]; `reset_password` redeems it with one
//! conditional update so a token can succeed at most once.

mod config;
mod sender;
mod service;


pub use config::PasswordResetConfig;
pub use sender::ResetLinkSender;
pub use service::{generate_reset_token, PasswordResetService};
