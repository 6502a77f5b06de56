//! Results returned by the authentication and password flows.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::PublicUser;

/// Successful login: a session token plus the public user projection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResult {
    pub token: String,
    pub user: PublicUser,
}

/// Outcome of a forgot-password request.
///
/// The caller always gets the same message; `reset_token` is only filled when
/// token exposure is enabled for local testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotPasswordOutcome {
    pub reset_token: Option<String>,
}
