use actix_web::{web, HttpResponse};
use validator::Validate;

use sm_core::errors::ValidationError;
use sm_core::repositories::{StudentRepository, UserRepository};
use sm_core::services::{AssistantClient, ImageStorage, ResetLinkSender};
use sm_shared::types::MessageResponse;

use crate::app::AppState;
use crate::dto::auth::RegisterRequest;
use crate::handlers::error::{request_validation_error, ApiError};

/// Handler for POST /api/auth/register
///
/// # Request Body
///
/// ```json
/// { "name": "A", "email": "a@x.com", "password": "pw" }
/// ```
///
/// # Response
///
/// `200 {"message": "Registered successfully"}`; `400` when a field is missing
/// or too long, or the email is already registered.
pub async fn register<U, S, I, N, A>(
    state: web::Data<AppState<U, S, I, N, A>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    I: ImageStorage + 'static,
    N: ResetLinkSender + 'static,
    A: AssistantClient + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return Err(request_validation_error(
            &errors,
            ValidationError::AllFieldsRequired,
        ));
    }

    let RegisterRequest {
        name,
        email,
        password,
    } = request;

    state
        .auth_service
        .register(
            name.as_deref().unwrap_or_default(),
            email.as_deref().unwrap_or_default(),
            password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Registered successfully")))
}
