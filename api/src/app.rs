//! Application state and factory
//!
//! This module wires the services into shared state and builds the
//! Actix-web application around them.

use std::sync::Arc;

use actix_files::Files;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use sm_core::errors::DomainError;
use sm_core::repositories::{StudentRepository, UserRepository};
use sm_core::services::{
    AssistantClient, AssistantService, AuthService, AuthServiceConfig, ImageStorage,
    PasswordResetConfig, PasswordResetService, ResetLinkSender, StudentService,
    StudentServiceConfig, TokenService,
};
use sm_shared::config::AppConfig;
use sm_shared::errors::error_codes;
use sm_shared::types::HealthResponse;

use crate::dto::error::route_not_found;
use crate::handlers::error::ApiError;
use crate::middleware::{cors::create_cors, security::SecurityMiddleware};
use crate::routes::{
    assistant::ask,
    auth::{list_users, login, register},
    password::{forgot_password, reset_password},
    students::{create_student, delete_student, list_students, update_student},
};

/// Plain-text answer of `GET /`
pub const BANNER: &str = "Student Management API running";

/// Application state that holds shared services
pub struct AppState<U, S, I, N, A>
where
    U: UserRepository,
    S: StudentRepository,
    I: ImageStorage,
    N: ResetLinkSender,
    A: AssistantClient,
{
    pub auth_service: Arc<AuthService<U>>,
    pub password_reset_service: Arc<PasswordResetService<U, N>>,
    pub student_service: Arc<StudentService<S, I>>,
    pub assistant_service: Arc<AssistantService<S, A>>,
    /// Upload cap enforced while the multipart body is read
    pub max_image_bytes: usize,
}

impl<U, S, I, N, A> AppState<U, S, I, N, A>
where
    U: UserRepository,
    S: StudentRepository,
    I: ImageStorage,
    N: ResetLinkSender,
    A: AssistantClient,
{
    /// Build every service from its collaborators and the configuration
    pub fn new(
        users: Arc<U>,
        students: Arc<S>,
        images: Arc<I>,
        reset_sender: Arc<N>,
        assistant: Arc<A>,
        token_service: Arc<TokenService>,
        config: &AppConfig,
    ) -> Self {
        let password = &config.auth.password;

        Self {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                token_service,
                AuthServiceConfig::from(password),
            )),
            password_reset_service: Arc::new(PasswordResetService::new(
                users,
                reset_sender,
                PasswordResetConfig::from(password),
            )),
            student_service: Arc::new(StudentService::new(
                students.clone(),
                images,
                StudentServiceConfig::from(&config.upload),
            )),
            assistant_service: Arc::new(AssistantService::new(students, assistant)),
            max_image_bytes: config.upload.max_image_bytes,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, S, I, N, A>(
    app_state: web::Data<AppState<U, S, I, N, A>>,
    token_service: web::Data<TokenService>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    I: ImageStorage + 'static,
    N: ResetLinkSender + 'static,
    A: AssistantClient + 'static,
{
    let cors = create_cors(&config.cors, config.environment);
    let security = SecurityMiddleware::new(config.environment, config.server.trusted_proxies.clone());

    let json_config = web::JsonConfig::default()
        .limit(config.server.max_json_payload)
        .error_handler(|err, _req| {
            log::debug!("Rejected JSON body: {}", err);
            ApiError::bad_request(error_codes::VALIDATION_ERROR, "Invalid JSON body").into()
        });
    let path_config = web::PathConfig::default()
        .error_handler(|_err, _req| ApiError::from(DomainError::not_found("Student")).into());

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(token_service)
        .app_data(json_config)
        .app_data(path_config)
        // Add middleware (security outermost, then CORS, then logging)
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(security)
        .route("/", web::get().to(banner))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<U, S, I, N, A>))
                        .route("/login", web::post().to(login::<U, S, I, N, A>))
                        .route("/users", web::get().to(list_users::<U, S, I, N, A>)),
                )
                .service(
                    web::scope("/password")
                        .route(
                            "/forgot-password",
                            web::post().to(forgot_password::<U, S, I, N, A>),
                        )
                        .route(
                            "/reset-password",
                            web::post().to(reset_password::<U, S, I, N, A>),
                        ),
                )
                .service(
                    web::scope("/students")
                        .route("", web::get().to(list_students::<U, S, I, N, A>))
                        .route("", web::post().to(create_student::<U, S, I, N, A>))
                        .route("/{id}", web::put().to(update_student::<U, S, I, N, A>))
                        .route("/{id}", web::delete().to(delete_student::<U, S, I, N, A>)),
                )
                .service(web::scope("/ai").route("/ask", web::post().to(ask::<U, S, I, N, A>))),
        )
        // Stored student images
        .service(Files::new("/uploads", config.upload.dir.clone()))
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

async fn banner() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(BANNER)
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "student-records-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    route_not_found()
}
