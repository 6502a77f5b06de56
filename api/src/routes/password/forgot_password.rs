use actix_web::{web, HttpResponse};
use validator::Validate;

use sm_core::errors::ValidationError;
use sm_core::repositories::{StudentRepository, UserRepository};
use sm_core::services::{AssistantClient, ImageStorage, ResetLinkSender};

use crate::app::AppState;
use crate::dto::password::{ForgotPasswordRequest, ForgotPasswordResponse};
use crate::handlers::error::ApiError;

/// Same body whether or not the email belongs to an account
pub const FORGOT_PASSWORD_MESSAGE: &str = "If email exists, reset link sent";

/// Handler for POST /api/password/forgot-password
///
/// # Response
///
/// ```json
/// { "message": "If email exists, reset link sent" }
/// ```
///
/// `resetToken` is added only when token exposure is enabled.
pub async fn forgot_password<U, S, I, N, A>(
    state: web::Data<AppState<U, S, I, N, A>>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    I: ImageStorage + 'static,
    N: ResetLinkSender + 'static,
    A: AssistantClient + 'static,
{
    let request = request.into_inner();
    let email = match (request.validate(), request.email) {
        (Ok(()), Some(email)) => email,
        _ => {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into())
        }
    };

    let outcome = state.password_reset_service.forgot_password(&email).await?;

    Ok(HttpResponse::Ok().json(ForgotPasswordResponse {
        message: FORGOT_PASSWORD_MESSAGE.to_string(),
        reset_token: outcome.reset_token,
    }))
}
