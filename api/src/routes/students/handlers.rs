use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

use sm_core::repositories::{StudentRepository, UserRepository};
use sm_core::services::{AssistantClient, ImageStorage, ResetLinkSender};
use sm_shared::types::MessageResponse;

use crate::app::AppState;
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;

use super::form::read_submission;

/// Handler for GET /api/students
///
/// Public listing of every student with `owner_name`, newest first.
pub async fn list_students<U, S, I, N, A>(
    state: web::Data<AppState<U, S, I, N, A>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    I: ImageStorage + 'static,
    N: ResetLinkSender + 'static,
    A: AssistantClient + 'static,
{
    let students = state.student_service.list().await?;
    Ok(HttpResponse::Ok().json(students))
}

/// Handler for POST /api/students
///
/// Multipart body: text fields `name`, `age`, `email`, `phone`, `gender`,
/// `course`, `address` and an optional `image` file.
pub async fn create_student<U, S, I, N, A>(
    auth: AuthContext,
    state: web::Data<AppState<U, S, I, N, A>>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    I: ImageStorage + 'static,
    N: ResetLinkSender + 'static,
    A: AssistantClient + 'static,
{
    let submission = read_submission(payload, state.max_image_bytes).await?;

    state
        .student_service
        .create(auth.identity(), submission.form, submission.image)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Student added")))
}

/// Handler for PUT /api/students/{id}
///
/// Same body as create. Only the owner may update; the previous image is
/// kept when no new file is sent.
pub async fn update_student<U, S, I, N, A>(
    auth: AuthContext,
    path: web::Path<i64>,
    state: web::Data<AppState<U, S, I, N, A>>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    I: ImageStorage + 'static,
    N: ResetLinkSender + 'static,
    A: AssistantClient + 'static,
{
    let id = path.into_inner();
    let submission = read_submission(payload, state.max_image_bytes).await?;

    state
        .student_service
        .update(auth.identity(), id, submission.form, submission.image)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Updated")))
}

/// Handler for DELETE /api/students/{id}
pub async fn delete_student<U, S, I, N, A>(
    auth: AuthContext,
    path: web::Path<i64>,
    state: web::Data<AppState<U, S, I, N, A>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    I: ImageStorage + 'static,
    N: ResetLinkSender + 'static,
    A: AssistantClient + 'static,
{
    state
        .student_service
        .delete(auth.identity(), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Deleted")))
}
