//! HTTP client for the student records API

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use sm_shared::{ErrorResponse, MessageResponse};

use crate::error::{ClientError, ClientResult};
use crate::models::{
    AskReply, ChatMessage, ForgotPasswordReply, ImageFile, LoginReply, Student, StudentInput,
    User,
};
use crate::session::Session;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// `api_url` is the server origin; calls go to `<api_url>/api/...`
    pub fn new(api_url: &str) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            base_url: format!("{}/api", api_url.trim_end_matches('/')),
            http,
        })
    }

    /// Read the server origin from `API_URL`, falling back to the local default
    pub fn from_env() -> ClientResult<Self> {
        let api_url = std::env::var("API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(&api_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        request.bearer_auth(&session.token)
    }

    // ── Auth ──────────────────────────────────────────────────────────

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ClientResult<String> {
        let request = self
            .http
            .post(self.url("/auth/register"))
            .json(&json!({ "name": name, "email": email, "password": password }));
        let reply: MessageResponse = send(request).await?;
        Ok(reply.message)
    }

    /// Sign in and return the session to keep
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }));
        let reply: LoginReply = send(request).await?;

        tracing::debug!("Signed in as user {}", reply.user.id);
        Ok(Session::new(reply.token, reply.user))
    }

    /// Admin-only listing of every account
    pub async fn list_users(&self, session: &Session) -> ClientResult<Vec<User>> {
        let request = self.authorized(self.http.get(self.url("/auth/users")), session);
        send(request).await
    }

    // ── Password reset ────────────────────────────────────────────────

    pub async fn forgot_password(&self, email: &str) -> ClientResult<ForgotPasswordReply> {
        let request = self
            .http
            .post(self.url("/password/forgot-password"))
            .json(&json!({ "email": email }));
        send(request).await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> ClientResult<String> {
        let request = self
            .http
            .post(self.url("/password/reset-password"))
            .json(&json!({ "token": token, "newPassword": new_password }));
        let reply: MessageResponse = send(request).await?;
        Ok(reply.message)
    }

    // ── Students ──────────────────────────────────────────────────────

    pub async fn list_students(&self) -> ClientResult<Vec<Student>> {
        send(self.http.get(self.url("/students"))).await
    }

    pub async fn create_student(
        &self,
        session: &Session,
        input: &StudentInput,
        image: Option<ImageFile>,
    ) -> ClientResult<String> {
        let request = self
            .authorized(self.http.post(self.url("/students")), session)
            .multipart(student_form(input, image)?);
        let reply: MessageResponse = send(request).await?;
        Ok(reply.message)
    }

    /// Without an image the stored one is kept
    pub async fn update_student(
        &self,
        session: &Session,
        id: i64,
        input: &StudentInput,
        image: Option<ImageFile>,
    ) -> ClientResult<String> {
        let request = self
            .authorized(self.http.put(self.url(&format!("/students/{}", id))), session)
            .multipart(student_form(input, image)?);
        let reply: MessageResponse = send(request).await?;
        Ok(reply.message)
    }

    pub async fn delete_student(&self, session: &Session, id: i64) -> ClientResult<String> {
        let request =
            self.authorized(self.http.delete(self.url(&format!("/students/{}", id))), session);
        let reply: MessageResponse = send(request).await?;
        Ok(reply.message)
    }

    // ── Assistant ─────────────────────────────────────────────────────

    pub async fn ask(&self, question: &str, history: &[ChatMessage]) -> ClientResult<AskReply> {
        let request = self
            .http
            .post(self.url("/ai/ask"))
            .json(&json!({ "question": question, "history": history }));
        send(request).await
    }
}

fn student_form(input: &StudentInput, image: Option<ImageFile>) -> ClientResult<Form> {
    let mut form = Form::new();
    for (name, value) in input.fields() {
        form = form.text(name, value);
    }

    if let Some(image) = image {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        form = form.part("image", part);
    }

    Ok(form)
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
    let response = request.send().await?;
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json().await?)
}

/// Turn a rejection into [`ClientError::Api`] with the server's message
async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(envelope) => envelope.message,
        Err(_) => serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                ["message", "error"]
                    .iter()
                    .find_map(|key| value.get(*key)?.as_str().map(str::to_string))
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            }),
    };

    tracing::debug!("API rejected request with {}: {}", status, message);
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
