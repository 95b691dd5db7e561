use thiserror::Error;

/// Errors surfaced by the summarizer library
#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("{service} is not configured: {reason}")]
    NotConfigured {
        service: &'static str,
        reason: String,
    },

    #[error("LLM request failed: {reason}")]
    LlmRequest { reason: String },

    #[error("LLM returned an empty response")]
    EmptyResponse,

    #[error("Storage operation failed: {reason}")]
    Storage { reason: String },

    #[error("Metadata extraction failed for {video_id}: {reason}")]
    MetadataExtraction { video_id: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SummarizerError>;
