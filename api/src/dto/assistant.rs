use serde::{Deserialize, Serialize};
use sm_core::domain::value_objects::ChatMessage;

/// Body of `POST /api/ai/ask`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,

    #[serde(default)]
    pub history: Option<Vec<ChatMessage>>,
}

/// Response of `POST /api/ai/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,

    #[serde(rename = "newHistory")]
    pub new_history: Vec<ChatMessage>,
}
