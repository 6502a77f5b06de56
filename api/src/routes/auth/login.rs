use actix_web::{web, HttpResponse};

use sm_core::repositories::{StudentRepository, UserRepository};
use sm_core::services::{AssistantClient, ImageStorage, ResetLinkSender};

use crate::app::AppState;
use crate::dto::auth::LoginRequest;
use crate::handlers::error::ApiError;

/// Handler for POST /api/auth/login
///
/// Responds with `{token, user}`. Unknown email and wrong password produce
/// the same `400 Invalid credentials`.
pub async fn login<U, S, I, N, A>(
    state: web::Data<AppState<U, S, I, N, A>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    I: ImageStorage + 'static,
    N: ResetLinkSender + 'static,
    A: AssistantClient + 'static,
{
    let result = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}
