pub mod providers;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// LLM client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key for the completion service
    pub api_key: Option<String>,

    /// Chat-completions endpoint override (for OpenAI-compatible servers)
    pub endpoint: Option<String>,

    /// Model to use
    pub model: String,

    /// Maximum tokens to generate. Only forwarded to the API when below
    /// the context limit; oversized values are treated as "no limit".
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: None,
            model: "gpt-4".to_string(),
            max_tokens: 100_000,
            temperature: 0.7,
            timeout_seconds: 120,
        }
    }
}

impl LlmConfig {
    /// Whether enough configuration is present to attempt a completion
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Chat message for LLM communication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// LLM completion response
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub tokens_used: Option<u32>,
}

/// Trait for text-completion providers
#[async_trait]
pub trait Llm: Send + Sync {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<LlmResponse>;
}

/// Create an LLM client from configuration. Fails with a "not configured"
/// error when no API key is present.
pub fn create_llm(config: &LlmConfig) -> Result<Box<dyn Llm>> {
    Ok(Box::new(providers::OpenAiProvider::new(config.clone())?))
}
