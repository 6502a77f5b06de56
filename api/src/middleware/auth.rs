//! Bearer token authentication for protected endpoints.
//!
//! Protection is expressed in the handler signature: a handler that takes an
//! [`AuthContext`] argument only runs once the `Authorization` header carried
//! a valid session token. The identity is handed to the handler as a value;
//! nothing is written into request extensions.

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use sm_core::{
    domain::entities::identity::Identity,
    errors::{AuthError, DomainError},
    services::token::TokenService,
};
use std::future::{ready, Ready};

use crate::handlers::error::ApiError;

/// Identity of the caller, decoded from a verified session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext(pub Identity);

impl AuthContext {
    pub fn identity(&self) -> &Identity {
        &self.0
    }

    pub fn into_identity(self) -> Identity {
        self.0
    }
}

impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(AuthContext))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, ApiError> {
    let token_service = req.app_data::<web::Data<TokenService>>().ok_or_else(|| {
        DomainError::internal("TokenService is not registered as application data")
    })?;

    let token = extract_bearer_token(req).ok_or(AuthError::MissingToken)?;

    Ok(token_service.authenticate(&token)?)
}

/// Extracts Bearer token from Authorization header
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|s| s.to_string())
}
