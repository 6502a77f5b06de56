use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/auth/register`
///
/// Fields are optional at the wire level so a missing field reaches
/// validation instead of failing JSON decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(required, length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(required, length(min = 1, max = 254))]
    pub email: Option<String>,

    #[validate(required, length(min = 1, max = 72))]
    pub password: Option<String>,
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}
