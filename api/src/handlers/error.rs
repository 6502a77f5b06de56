//! Mapping of domain errors to HTTP responses.
//!
//! Every failure leaves the API through [`handle_domain_error`] or
//! [`ApiError`], so all error bodies share the `ErrorResponse` envelope.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sm_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use sm_shared::errors::{error_codes, ErrorResponse};

use crate::dto::error::ErrorResponseExt;

/// Error type returned by handlers and extractors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A request rejected before it reached a service
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl ApiError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status: StatusCode::BAD_REQUEST,
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status: StatusCode::FORBIDDEN,
            code: error_codes::FORBIDDEN,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::Domain(error.into())
    }
}

/// Translate request-body validation failures.
///
/// A missing or blank field yields `missing`; a field over its length cap
/// yields [`ValidationError::TooLong`] naming that field.
pub fn request_validation_error(
    errors: &validator::ValidationErrors,
    missing: ValidationError,
) -> ApiError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut too_long = None;
    for (field, field_errors) in fields {
        for error in field_errors.iter() {
            let value = error.params.get("value").and_then(|v| v.as_str());
            let max = error
                .params
                .get("max")
                .and_then(|v| v.as_u64())
                .map(|max| max as usize);

            match (&*error.code, value, max) {
                ("length", Some(value), Some(max)) if value.chars().count() > max => {
                    too_long.get_or_insert(ValidationError::TooLong {
                        field: field.to_string(),
                        max,
                    });
                }
                _ => return missing.into(),
            }
        }
    }

    too_long.unwrap_or(missing).into()
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => error_parts(error).0,
            ApiError::Rejected { status, .. } => *status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Domain(error) => handle_domain_error(error),
            ApiError::Rejected {
                status,
                code,
                message,
            } => ErrorResponse::new(*code, message.clone()).to_response(*status),
        }
    }
}

/// Convert a domain error into its single HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code, message) = error_parts(error);

    if status.is_server_error() {
        log::error!("Request failed: {}", error);
    } else {
        log::debug!("Request rejected ({}): {}", status.as_u16(), error);
    }

    let mut response = ErrorResponse::new(code, message);
    if let DomainError::Validation(ValidationError::FileTooLarge { max_bytes }) = error {
        response = response.add_detail("max_bytes", max_bytes);
    }

    response.to_response(status)
}

/// Status, stable error code and user-facing message for a domain error
fn error_parts(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Validation(validation) => validation_parts(validation),

        DomainError::Auth(auth) => match auth {
            AuthError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_CREDENTIALS,
                "Invalid credentials".to_string(),
            ),
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                error_codes::UNAUTHORIZED,
                "Authorization missing".to_string(),
            ),
            AuthError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                error_codes::FORBIDDEN,
                "Not allowed".to_string(),
            ),
        },

        DomainError::Token(TokenError::TokenGenerationFailed) => server_error(),
        DomainError::Token(TokenError::TokenExpired) => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_EXPIRED,
            "Invalid token".to_string(),
        ),
        DomainError::Token(_) => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_INVALID,
            "Invalid token".to_string(),
        ),

        DomainError::Forbidden { .. } => (
            StatusCode::FORBIDDEN,
            error_codes::FORBIDDEN,
            "Not allowed".to_string(),
        ),
        DomainError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            "Not found".to_string(),
        ),
        DomainError::Conflict { message } => (
            StatusCode::BAD_REQUEST,
            error_codes::CONFLICT,
            message.clone(),
        ),
        DomainError::Internal { .. } => server_error(),
    }
}

fn validation_parts(error: &ValidationError) -> (StatusCode, &'static str, String) {
    let message = match error {
        ValidationError::AllFieldsRequired => "All fields are required".to_string(),
        ValidationError::RequiredField { field } => match field.as_str() {
            "email" => "Email required".to_string(),
            "question" => "Please ask a question.".to_string(),
            "token" | "newPassword" => "All fields required".to_string(),
            other => format!("{} is required", capitalize(other)),
        },
        ValidationError::InvalidFormat { field } => match field.as_str() {
            "age" => "Age must be a non-negative whole number".to_string(),
            other => format!("Invalid {}", other),
        },
        ValidationError::InvalidEmail => "Invalid email".to_string(),
        ValidationError::InvalidResetToken => {
            return (
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_RESET_TOKEN,
                "Invalid or expired token".to_string(),
            )
        }
        ValidationError::UnsupportedFileType { .. } => "Only image uploads are allowed".to_string(),
        ValidationError::TooLong { field, max } => {
            format!("{} must be at most {} characters", field_label(field), max)
        }
        ValidationError::FileTooLarge { .. } => "Image is too large".to_string(),
    };

    (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
}

fn server_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        "Server error".to_string(),
    )
}

fn field_label(field: &str) -> String {
    capitalize(&field.replace('_', " "))
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
