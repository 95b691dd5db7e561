use serde::{Deserialize, Serialize};

use crate::error::{Result, SummarizerError};
use crate::llm::LlmConfig;
use crate::metadata::MetadataConfig;
use crate::storage::StorageConfig;

/// Top-level configuration for the summarizer library
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// LLM completion settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Supabase storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// yt-dlp metadata extraction settings
    #[serde(default)]
    pub metadata: MetadataConfig,
}

impl Config {
    /// Load configuration from a TOML file, falling back through known
    /// locations and finally to environment variables.
    pub fn load() -> Result<Self> {
        let config_paths = ["yt-summarizer.toml", "config/yt-summarizer.toml"];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self::from_env())
    }

    /// Build configuration from environment variables, with the same
    /// defaults the original deployment used.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.llm.api_key = std::env::var("OPENAI_API_KEY").ok();

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.llm.model = model;
        }

        if let Ok(max_tokens) = std::env::var("OPENAI_MAX_TOKENS") {
            if let Ok(max_tokens) = max_tokens.parse() {
                config.llm.max_tokens = max_tokens;
            }
        }

        if let Ok(temperature) = std::env::var("OPENAI_TEMPERATURE") {
            if let Ok(temperature) = temperature.parse() {
                config.llm.temperature = temperature;
            }
        }

        config.storage.url = std::env::var("SUPABASE_URL").ok();
        config.storage.api_key = std::env::var("SUPABASE_API_KEY").ok();
        config.metadata.proxy = std::env::var("YOUTUBE_PROXY").ok();

        config
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(SummarizerError::NotConfigured {
                service: "LLM",
                reason: format!(
                    "temperature must be between 0.0 and 2.0, got {}",
                    self.llm.temperature
                ),
            });
        }

        if self.llm.model.is_empty() {
            return Err(SummarizerError::NotConfigured {
                service: "LLM",
                reason: "model must not be empty".to_string(),
            });
        }

        if self.storage.url.is_some() != self.storage.api_key.is_some() {
            return Err(SummarizerError::NotConfigured {
                service: "storage",
                reason: "SUPABASE_URL and SUPABASE_API_KEY must be set together".to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for programmatic configuration
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.llm.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.llm.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.llm.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.llm.max_tokens = max_tokens;
        self
    }

    pub fn with_storage(
        mut self,
        url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        self.config.storage.url = Some(url.into());
        self.config.storage.api_key = Some(api_key.into());
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.metadata.proxy = Some(proxy.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
