//! Assistant chat backend configuration

use serde::{Deserialize, Serialize};

/// Remote chat backend used by `POST /api/ai/ask`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    /// Chat endpoint URL
    pub api_url: String,

    /// Bearer key; the assistant answers with a fallback message when unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name sent with every request
    pub model: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://api.cohere.ai/v1/chat"),
            api_key: None,
            model: String::from("command-a-03-2025"),
            timeout_seconds: 30,
        }
    }
}

impl AssistantConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("ASSISTANT_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("ASSISTANT_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("ASSISTANT_MODEL").unwrap_or(defaults.model),
            timeout_seconds: std::env::var("ASSISTANT_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_seconds),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}
