use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/password/forgot-password`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(required)]
    pub email: Option<String>,
}

/// Response of `POST /api/password/forgot-password`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    pub message: String,

    /// Present only when token exposure is switched on
    #[serde(rename = "resetToken", default, skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

/// Body of `POST /api/password/reset-password`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(required)]
    pub token: Option<String>,

    #[serde(rename = "newPassword")]
    #[validate(required, length(max = 72))]
    pub new_password: Option<String>,
}
