use actix_web::{web, HttpResponse};

use sm_core::repositories::{StudentRepository, UserRepository};
use sm_core::services::{AssistantClient, ImageStorage, ResetLinkSender};

use crate::app::AppState;
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/auth/users (admin only)
///
/// Lists every account as `{id, name, email, role}`, newest first.
pub async fn list_users<U, S, I, N, A>(
    auth: AuthContext,
    state: web::Data<AppState<U, S, I, N, A>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    I: ImageStorage + 'static,
    N: ResetLinkSender + 'static,
    A: AssistantClient + 'static,
{
    let users = state.auth_service.list_users(auth.identity()).await?;
    Ok(HttpResponse::Ok().json(users))
}
