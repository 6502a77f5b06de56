//! Security middleware for enforcing HTTPS and adding protective headers.
//!
//! In production every request must arrive over HTTPS (directly or through a
//! trusted proxy) and responses carry HSTS, nosniff and framing headers.
//! Development and staging pass requests through untouched.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use sm_shared::config::Environment;
use sm_shared::errors::error_codes;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::handlers::error::ApiError;

/// Security middleware factory for enforcing HTTPS and security policies
#[derive(Debug, Clone)]
pub struct SecurityMiddleware {
    /// Whether to enforce HTTPS (disabled outside production)
    enforce_https: bool,
    /// Whether to add security headers
    add_security_headers: bool,
    /// List of trusted proxies for X-Forwarded-* headers
    trusted_proxies: Vec<String>,
}

impl SecurityMiddleware {
    /// Creates a security middleware for the given environment
    pub fn new(environment: Environment, trusted_proxies: Vec<String>) -> Self {
        let production = environment.is_production();

        log::info!(
            "Security middleware configured: enforce_https={}, add_headers={}, trusted_proxies={:?}",
            production,
            production,
            trusted_proxies
        );

        Self {
            enforce_https: production,
            add_security_headers: production,
            trusted_proxies,
        }
    }

    /// Creates a security middleware for development (no HTTPS enforcement)
    pub fn development() -> Self {
        Self {
            enforce_https: false,
            add_security_headers: false,
            trusted_proxies: vec!["127.0.0.1".to_string(), "::1".to_string()],
        }
    }

    /// Adds a trusted proxy to the whitelist
    pub fn with_trusted_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.trusted_proxies.push(proxy.into());
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            enforce_https: self.enforce_https,
            add_security_headers: self.add_security_headers,
            trusted_proxies: Rc::new(self.trusted_proxies.clone()),
        }))
    }
}

/// Security middleware service implementation
pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let enforce_https = self.enforce_https;
        let add_security_headers = self.add_security_headers;
        let trusted_proxies = Rc::clone(&self.trusted_proxies);

        Box::pin(async move {
            if enforce_https && !is_secure_request(&req, &trusted_proxies) {
                log::warn!("Insecure request blocked: {} {}", req.method(), req.path());
                return Err(ApiError::forbidden("HTTPS required").into());
            }

            if let Some(origin) = req.headers().get(header::ORIGIN) {
                if !is_valid_origin(origin) {
                    log::warn!(
                        "Invalid origin blocked: {:?} for {} {}",
                        origin,
                        req.method(),
                        req.path()
                    );
                    return Err(
                        ApiError::bad_request(error_codes::VALIDATION_ERROR, "Invalid request origin")
                            .into(),
                    );
                }
            }

            let mut response = service.call(req).await?;

            if add_security_headers {
                add_security_response_headers(&mut response);
            }

            Ok(response)
        })
    }
}

/// Checks if the request is secure (HTTPS or from trusted source)
fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[String]) -> bool {
    let conn_info = req.connection_info();
    if conn_info.scheme() == "https" {
        return true;
    }

    // X-Forwarded-Proto is only believed when it comes from a trusted proxy
    if let Some(forwarded_proto) = req.headers().get("x-forwarded-proto") {
        if let Ok(proto) = forwarded_proto.to_str() {
            let peer_addr = req
                .peer_addr()
                .map(|addr| addr.ip().to_string())
                .unwrap_or_default();
            if proto == "https" && is_trusted_proxy(&peer_addr, trusted_proxies) {
                return true;
            }
        }
    }

    let host = conn_info.host();
    host == "localhost" || host.starts_with("localhost:") || host.starts_with("127.0.0.1")
}

/// Checks if the given IP address is in the trusted proxy list
fn is_trusted_proxy(peer_ip: &str, trusted_proxies: &[String]) -> bool {
    !peer_ip.is_empty() && trusted_proxies.iter().any(|trusted| trusted == peer_ip)
}

/// Browsers send a scheme-qualified origin; anything else is malformed
fn is_valid_origin(origin: &HeaderValue) -> bool {
    origin
        .to_str()
        .map(|origin| origin.starts_with("http://") || origin.starts_with("https://"))
        .unwrap_or(false)
}

/// Adds security headers to the response
fn add_security_response_headers<B>(response: &mut ServiceResponse<B>) {
    let headers = response.headers_mut();

    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    // Uploaded images are embedded by the client from another origin
    headers.insert(
        header::HeaderName::from_static("cross-origin-resource-policy"),
        HeaderValue::from_static("cross-origin"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[::std::prelude::v1::test]
    fn test_is_trusted_proxy() {
        let proxies = vec!["10.0.0.1".to_string()];
        assert!(is_trusted_proxy("10.0.0.1", &proxies));
        assert!(!is_trusted_proxy("10.0.0.2", &proxies));
        assert!(!is_trusted_proxy("", &proxies));
    }

    #[::std::prelude::v1::test]
    fn test_is_valid_origin() {
        assert!(is_valid_origin(&HeaderValue::from_static("http://localhost:5173")));
        assert!(is_valid_origin(&HeaderValue::from_static("https://students.example.com")));
        assert!(!is_valid_origin(&HeaderValue::from_static("null")));
    }

    #[actix_web::test]
    async fn test_production_adds_headers_for_localhost() {
        let app = test::init_service(
            App::new()
                .wrap(SecurityMiddleware::new(Environment::Production, vec![]))
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::HOST, "localhost:5000"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );
    }

    #[actix_web::test]
    async fn test_development_passes_through() {
        let app = test::init_service(
            App::new()
                .wrap(SecurityMiddleware::development())
                .route("/", web::get().to(ok)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get(header::X_CONTENT_TYPE_OPTIONS).is_none());
    }
}
