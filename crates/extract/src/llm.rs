use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExtractError;
use crate::prompt::ChatMessage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://llama:8000/v1".to_string(),
            model: "meta/llama-3.1-8b-instruct".to_string(),
            temperature: 0.0,
        }
    }
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint
#[derive(Clone)]
pub struct ChatClient {
    config: ChatConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ExtractError> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            stream: false,
        };

        debug!(url = %url, model = %self.config.model, messages = messages.len(), "Sending chat request");

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Status { status, body });
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ExtractError::EmptyResponse)
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new(ChatConfig::default())
    }
}
