use std::time::Duration;

use async_trait::async_trait;
use reqwest;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatMessage, Llm, LlmConfig, LlmResponse};
use crate::error::{Result, SummarizerError};

const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Tokens above this would exceed the completion context window, so the
/// `max_tokens` field is omitted from the request instead.
const MAX_TOKENS_REQUEST_LIMIT: u32 = 16_000;

/// OpenAI chat-completions provider. Also speaks to OpenAI-compatible
/// servers via the `endpoint` override in [`LlmConfig`].
pub struct OpenAiProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    total_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(config: LlmConfig) -> Result<Self> {
        if config.api_key.is_none() {
            return Err(SummarizerError::NotConfigured {
                service: "LLM",
                reason: "OpenAI API key is not set".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> &str {
        self.config
            .endpoint
            .as_deref()
            .unwrap_or(OPENAI_CHAT_COMPLETIONS_URL)
    }
}

#[async_trait]
impl Llm for OpenAiProvider {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<LlmResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| SummarizerError::NotConfigured {
                service: "LLM",
                reason: "OpenAI API key is not set".to_string(),
            })?;

        let max_tokens = if self.config.max_tokens > 0
            && self.config.max_tokens < MAX_TOKENS_REQUEST_LIMIT
        {
            Some(self.config.max_tokens)
        } else {
            None
        };

        let request = OpenAiRequest {
            model: self.config.model.clone(),
            messages,
            temperature: self.config.temperature,
            max_tokens,
        };

        debug!("Sending chat-completion request to {}", self.endpoint());

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SummarizerError::LlmRequest {
                reason: format!("API error {}: {}", status, text),
            });
        }

        let completion: OpenAiResponse = response.json().await?;

        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(SummarizerError::EmptyResponse)?;

        let tokens_used = completion.usage.map(|u| u.total_tokens);

        Ok(LlmResponse {
            content,
            tokens_used,
        })
    }
}
