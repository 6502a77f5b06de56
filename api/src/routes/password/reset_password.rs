use actix_web::{web, HttpResponse};
use validator::Validate;

use sm_core::errors::{DomainError, ValidationError};
use sm_core::repositories::{StudentRepository, UserRepository};
use sm_core::services::{AssistantClient, ImageStorage, ResetLinkSender};
use sm_shared::types::MessageResponse;

use crate::app::AppState;
use crate::dto::password::ResetPasswordRequest;
use crate::handlers::error::{request_validation_error, ApiError};

/// Handler for POST /api/password/reset-password
///
/// Redeems a reset token once. Unknown, consumed or expired tokens answer
/// `400 Invalid or expired token`.
pub async fn reset_password<U, S, I, N, A>(
    state: web::Data<AppState<U, S, I, N, A>>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    I: ImageStorage + 'static,
    N: ResetLinkSender + 'static,
    A: AssistantClient + 'static,
{
    let request = request.into_inner();
    let missing_field = || ValidationError::RequiredField {
        field: "token".to_string(),
    };
    let missing = || -> ApiError { missing_field().into() };

    if let Err(errors) = request.validate() {
        return Err(request_validation_error(&errors, missing_field()));
    }
    let (Some(token), Some(new_password)) = (request.token, request.new_password) else {
        return Err(missing());
    };

    match state
        .password_reset_service
        .reset_password(&token, &new_password)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse::new("Password reset successful"))),
        // Blank values are reported with this endpoint's wording
        Err(DomainError::Validation(ValidationError::AllFieldsRequired)) => Err(missing()),
        Err(e) => Err(e.into()),
    }
}
