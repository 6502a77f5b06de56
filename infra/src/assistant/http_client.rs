//! reqwest-based chat client
//!
//! Speaks a Cohere-style chat API: the request carries the model, a preamble,
//! the user's message and the previous turns; the response carries the answer
//! text and the updated history.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use sm_core::domain::value_objects::ChatMessage;
use sm_core::errors::DomainError;
use sm_core::services::{AssistantClient, AssistantReply, AssistantRequest};
use sm_shared::config::AssistantConfig;

use crate::InfrastructureError;

const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    preamble: &'a str,
    message: &'a str,
    chat_history: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    text: String,
    #[serde(default)]
    chat_history: Option<Vec<ChatMessage>>,
}

pub struct HttpAssistantClient {
    client: reqwest::Client,
    config: AssistantConfig,
}

impl HttpAssistantClient {
    pub fn new(config: AssistantConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        if !config.is_enabled() {
            tracing::warn!("ASSISTANT_API_KEY not set; assistant will answer with a fallback message");
        }

        Ok(Self { client, config })
    }
}

#[async_trait]
impl AssistantClient for HttpAssistantClient {
    async fn chat(&self, request: AssistantRequest) -> Result<AssistantReply, DomainError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::internal("assistant API key is not configured"))?;

        let body = ChatRequestBody {
            model: &self.config.model,
            preamble: &request.preamble,
            message: &request.message,
            chat_history: &request.chat_history,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(InfrastructureError::from)?;

        let parsed: ChatResponseBody = response.json().await.map_err(InfrastructureError::from)?;

        Ok(AssistantReply {
            answer: parsed.text,
            history: parsed.chat_history.unwrap_or(request.chat_history),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(url: String, key: Option<&str>) -> AssistantConfig {
        AssistantConfig {
            api_url: url,
            api_key: key.map(String::from),
            model: "test-model".to_string(),
            timeout_seconds: 5,
        }
    }

    fn request() -> AssistantRequest {
        AssistantRequest {
            preamble: "facts".to_string(),
            message: "How many?".to_string(),
            chat_history: vec![ChatMessage {
                role: "USER".to_string(),
                message: "hi".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_chat_posts_request_and_reads_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat"))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "message": "How many?",
                "preamble": "facts"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "text": "Two.",
                "chat_history": [
                    {"role": "USER", "message": "How many?"},
                    {"role": "CHATBOT", "message": "Two."}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            HttpAssistantClient::new(config(format!("{}/v1/chat", server.uri()), Some("secret"))).unwrap();
        let reply = client.chat(request()).await.unwrap();

        assert_eq!(reply.answer, "Two.");
        assert_eq!(reply.history.len(), 2);
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = HttpAssistantClient::new(config(server.uri(), Some("secret"))).unwrap();
        let result = client.chat(request()).await;

        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_calling_out() {
        let client = HttpAssistantClient::new(config("http://127.0.0.1:9".to_string(), None)).unwrap();
        let result = client.chat(request()).await;

        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }
}
