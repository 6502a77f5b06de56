use actix_web::{web, HttpResponse};

use sm_core::repositories::{StudentRepository, UserRepository};
use sm_core::services::{AssistantClient, ImageStorage, ResetLinkSender};

use crate::app::AppState;
use crate::dto::assistant::{AskRequest, AskResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /api/ai/ask
///
/// # Request Body
///
/// ```json
/// { "question": "How many students take Math?", "history": [] }
/// ```
///
/// # Response
///
/// ```json
/// { "answer": "...", "newHistory": [{"role": "USER", "message": "..."}] }
/// ```
pub async fn ask<U, S, I, N, A>(
    state: web::Data<AppState<U, S, I, N, A>>,
    request: web::Json<AskRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    I: ImageStorage + 'static,
    N: ResetLinkSender + 'static,
    A: AssistantClient + 'static,
{
    let AskRequest { question, history } = request.into_inner();

    let reply = state
        .assistant_service
        .ask(question.as_deref().unwrap_or_default(), history.unwrap_or_default())
        .await?;

    Ok(HttpResponse::Ok().json(AskResponse {
        answer: reply.answer,
        new_history: reply.history,
    }))
}
