//! Error envelope helpers for actix-web

use actix_web::{http::StatusCode, HttpResponse};
pub use sm_shared::errors::ErrorResponse;

/// Render the shared error envelope with a status code
pub trait ErrorResponseExt {
    fn to_response(&self, status: StatusCode) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

/// Envelope for the default service: unknown routes answer 404 in JSON
pub fn route_not_found() -> HttpResponse {
    ErrorResponse::new(
        sm_shared::errors::error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .to_response(StatusCode::NOT_FOUND)
}
