//! Chat backend seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ChatMessage;
use crate::errors::DomainError;

/// One question sent to the chat backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantRequest {
    /// System instructions including the database facts
    pub preamble: String,
    pub message: String,
    pub chat_history: Vec<ChatMessage>,
}

/// Answer and the conversation history to continue with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub answer: String,
    pub history: Vec<ChatMessage>,
}

#[async_trait]
pub trait AssistantClient: Send + Sync {
    async fn chat(&self, request: AssistantRequest) -> Result<AssistantReply, DomainError>;
}
