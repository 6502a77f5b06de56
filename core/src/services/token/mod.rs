//! Token service module for session JWTs
//!
//! Issues HS256-signed session tokens at login and verifies them on every
//! protected request. Tokens are stateless: nothing is stored server-side and
//! there is no revocation; a token is valid until it expires.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
