use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use log::{info, warn};

use sm_api::app::{create_app, AppState};
use sm_core::services::{TokenService, TokenServiceConfig};
use sm_infra::database::{DatabasePool, MySqlStudentRepository, MySqlUserRepository};
use sm_infra::{HttpAssistantClient, LocalImageStorage, LoggingResetLinkSender};
use sm_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env();

    // Initialize logger
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.environment.default_log_filter()),
    );

    info!("Starting student records API ({})", config.environment);

    let problems = config.validate();
    if !problems.is_empty() {
        for problem in &problems {
            warn!("Configuration problem: {}", problem);
        }
        if config.must_refuse_start() {
            anyhow::bail!("refusing to start with an invalid configuration");
        }
    }
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the development secret");
    }
    if config.auth.password.expose_reset_token {
        warn!("Password reset tokens are returned in API responses (PASSWORD_RESET_EXPOSE_TOKEN)");
    }

    // Database
    let db_pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        db_pool
            .run_migrations()
            .await
            .context("failed to apply database migrations")?;
    }

    tokio::fs::create_dir_all(&config.upload.dir)
        .await
        .with_context(|| format!("failed to create upload directory {}", config.upload.dir.display()))?;

    // Repositories and collaborators
    let user_repo = Arc::new(MySqlUserRepository::new(db_pool.get_pool().clone()));
    let student_repo = Arc::new(MySqlStudentRepository::new(db_pool.get_pool().clone()));
    let image_storage = Arc::new(LocalImageStorage::new(config.upload.dir.clone()));
    let reset_sender = Arc::new(LoggingResetLinkSender::new());
    let assistant_client = Arc::new(
        HttpAssistantClient::new(config.assistant.clone())
            .context("failed to build the assistant HTTP client")?,
    );

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));

    let app_state = web::Data::new(AppState::new(
        user_repo,
        student_repo,
        image_storage,
        reset_sender,
        assistant_client,
        token_service.clone(),
        &config,
    ));
    let token_data = web::Data::from(token_service);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), token_data.clone(), &app_config)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    info!("Server stopped, closing database pool");
    db_pool.close().await;

    Ok(())
}
