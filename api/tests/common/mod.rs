//! Shared fixtures for the API integration tests: the real application over
//! in-memory repositories and recording collaborators.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    web, App, Error,
};
use async_trait::async_trait;
use tempfile::TempDir;

use sm_api::app::{create_app, AppState};
use sm_core::domain::entities::student::ImageUpload;
use sm_core::domain::entities::user::{NewUser, Role};
use sm_core::domain::value_objects::ChatMessage;
use sm_core::errors::DomainError;
use sm_core::repositories::{MockStudentRepository, MockUserRepository, UserRepository};
use sm_core::services::{
    AssistantClient, AssistantReply, AssistantRequest, ImageStorage, PasswordHasher,
    ResetLinkSender, TokenService, TokenServiceConfig,
};
use sm_shared::config::AppConfig;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const BOUNDARY: &str = "----student-records-test-boundary";

/// Image storage that only records paths
#[derive(Default)]
pub struct MemoryImageStorage {
    pub stored: Mutex<Vec<String>>,
    pub removed: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageStorage for MemoryImageStorage {
    async fn store(&self, upload: &ImageUpload) -> Result<String, DomainError> {
        let mut stored = self.stored.lock().unwrap();
        let path = format!("/uploads/students/{}.{}", stored.len() + 1, upload.extension().unwrap_or("bin"));
        stored.push(path.clone());
        Ok(path)
    }

    async fn remove(&self, public_path: &str) -> Result<(), DomainError> {
        self.removed.lock().unwrap().push(public_path.to_string());
        Ok(())
    }
}

/// Reset-link sender that keeps every token it was handed
#[derive(Default)]
pub struct RecordingResetSender {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingResetSender {
    pub fn last_token(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl ResetLinkSender for RecordingResetSender {
    async fn send_reset_link(&self, email: &str, token: &str) -> Result<(), DomainError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), token.to_string()));
        Ok(())
    }
}

/// Chat backend that echoes the question and remembers the last preamble
#[derive(Default)]
pub struct EchoAssistant {
    pub last_preamble: Mutex<Option<String>>,
}

#[async_trait]
impl AssistantClient for EchoAssistant {
    async fn chat(&self, request: AssistantRequest) -> Result<AssistantReply, DomainError> {
        *self.last_preamble.lock().unwrap() = Some(request.preamble.clone());

        let mut history = request.chat_history;
        history.push(ChatMessage {
            role: "USER".to_string(),
            message: request.message.clone(),
        });
        let answer = format!("You asked: {}", request.message);
        history.push(ChatMessage {
            role: "CHATBOT".to_string(),
            message: answer.clone(),
        });

        Ok(AssistantReply { answer, history })
    }
}

pub type TestState = AppState<
    MockUserRepository,
    MockStudentRepository,
    MemoryImageStorage,
    RecordingResetSender,
    EchoAssistant,
>;

/// Everything a test needs to drive the application and inspect its stores
pub struct TestContext {
    pub users: MockUserRepository,
    pub students: MockStudentRepository,
    pub images: Arc<MemoryImageStorage>,
    pub sender: Arc<RecordingResetSender>,
    pub assistant: Arc<EchoAssistant>,
    pub token_service: Arc<TokenService>,
    pub config: AppConfig,
    state: web::Data<TestState>,
    _upload_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_exposed_tokens(true)
    }

    pub fn with_exposed_tokens(expose: bool) -> Self {
        let upload_dir = tempfile::tempdir().unwrap();

        let mut config = AppConfig::default();
        config.auth.jwt.secret = TEST_SECRET.to_string();
        config.auth.password.bcrypt_cost = 4;
        config.auth.password.expose_reset_token = expose;
        config.upload.dir = upload_dir.path().to_path_buf();
        config.upload.max_image_bytes = 1024;

        let users = MockUserRepository::new();
        let students = MockStudentRepository::new();
        let images = Arc::new(MemoryImageStorage::default());
        let sender = Arc::new(RecordingResetSender::default());
        let assistant = Arc::new(EchoAssistant::default());
        let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(
            &config.auth.jwt,
        )));

        let state = web::Data::new(AppState::new(
            Arc::new(users.clone()),
            Arc::new(students.clone()),
            images.clone(),
            sender.clone(),
            assistant.clone(),
            token_service.clone(),
            &config,
        ));

        Self {
            users,
            students,
            images,
            sender,
            assistant,
            token_service,
            config,
            state,
            _upload_dir: upload_dir,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        create_app(
            self.state.clone(),
            web::Data::from(self.token_service.clone()),
            &self.config,
        )
    }

    /// Insert an account directly and return a session token for it
    pub async fn seed_user(&self, name: &str, email: &str, role: Role) -> (i64, String) {
        let password_hash = PasswordHasher::new(4).hash("pw").await.unwrap();
        let user = self
            .users
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await
            .unwrap();
        self.students.set_owner_name(user.id, name).await;

        let token = self.token_service.issue(user.id, &user.email, role).unwrap();
        (user.id, token)
    }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Image part of a multipart body
pub struct FilePart<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

/// Encode text fields and an optional `image` part as multipart/form-data
pub fn multipart(fields: &[(&str, &str)], image: Option<FilePart<'_>>) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }

    if let Some(file) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}
