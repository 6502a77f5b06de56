//! CORS middleware configuration for cross-origin requests.
//!
//! The browser client is served from a different origin than the API, so
//! every route answers preflight requests. Origins come from `CorsConfig`;
//! an empty list accepts any origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use sm_shared::config::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the given configuration.
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        if environment.is_production() {
            log::warn!("CORS accepts any origin; set ALLOWED_ORIGINS to restrict it");
        } else {
            log::info!("Configuring permissive CORS for {}", environment);
        }
        return cors.allow_any_origin();
    }

    for origin in &config.allowed_origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}
