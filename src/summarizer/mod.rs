pub mod postprocess;
pub mod prompt;

use tracing::{debug, info, warn};

use crate::error::{Result, SummarizerError};
use crate::llm::{create_llm, ChatMessage, Llm, LlmConfig};
use crate::transcript::{format_transcript_for_display, Chapter, TranscriptEntry, VideoInfo};

pub use postprocess::finalize_summary;
pub use prompt::{build_summary_prompt, SYSTEM_PROMPT};

/// Character budget for transcript text sent to the LLM. Conservative
/// enough to stay inside a 16k-token context window.
pub const MAX_TRANSCRIPT_CHARS: usize = 40_000;

const TRUNCATION_NOTICE: &str = "\n\n[Transcript truncated due to length...]";

/// Generates AI summaries of YouTube transcripts.
///
/// Holds its own LLM client, constructed once from configuration. Without
/// an API key the summarizer still constructs, but summary generation
/// surfaces a distinct "not configured" failure since it has no fallback
/// output.
pub struct TranscriptSummarizer {
    config: LlmConfig,
    llm: Option<Box<dyn Llm>>,
}

impl TranscriptSummarizer {
    /// Create a summarizer from LLM configuration
    pub fn new(config: LlmConfig) -> Self {
        let llm = if config.is_configured() {
            match create_llm(&config) {
                Ok(llm) => Some(llm),
                Err(e) => {
                    warn!("Failed to initialize LLM client: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self { config, llm }
    }

    /// Create a summarizer with an injected LLM client
    pub fn with_llm(config: LlmConfig, llm: Box<dyn Llm>) -> Self {
        Self {
            config,
            llm: Some(llm),
        }
    }

    /// Whether summary generation is possible
    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Model name the summarizer generates with
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Annotate transcript entries as timestamped lines and enforce the
    /// character budget, appending a truncation notice when needed.
    pub fn prepare_transcript(&self, transcript: &[TranscriptEntry]) -> String {
        let transcript_text = format_transcript_for_display(transcript);

        if transcript_text.chars().count() <= MAX_TRANSCRIPT_CHARS {
            return transcript_text;
        }

        debug!(
            "Transcript of {} chars exceeds budget of {}, truncating",
            transcript_text.chars().count(),
            MAX_TRANSCRIPT_CHARS
        );

        let truncated: String = transcript_text.chars().take(MAX_TRANSCRIPT_CHARS).collect();
        format!("{}{}", truncated, TRUNCATION_NOTICE)
    }

    /// Summarize a transcript end to end: annotate and truncate the
    /// entries, build the prompt, call the LLM, and post-process the
    /// result into the final summary document.
    pub async fn summarize(
        &self,
        transcript: &[TranscriptEntry],
        chapters: Option<&[Chapter]>,
        video_id: Option<&str>,
        video_info: Option<&VideoInfo>,
    ) -> Result<String> {
        let transcript_text = self.prepare_transcript(transcript);
        self.summarize_text(&transcript_text, chapters, video_id, video_info)
            .await
    }

    /// Summarize already-annotated transcript text
    pub async fn summarize_text(
        &self,
        transcript_content: &str,
        chapters: Option<&[Chapter]>,
        video_id: Option<&str>,
        video_info: Option<&VideoInfo>,
    ) -> Result<String> {
        let llm = self.llm.as_ref().ok_or_else(|| SummarizerError::NotConfigured {
            service: "LLM",
            reason: "API key not configured or client initialization failed".to_string(),
        })?;

        let prompt = build_summary_prompt(transcript_content, chapters);
        let messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];

        let response = llm.chat(messages).await?;
        info!(
            "Generated summary ({} chars, {:?} tokens)",
            response.content.len(),
            response.tokens_used
        );

        Ok(finalize_summary(
            &response.content,
            chapters,
            video_id,
            video_info,
        ))
    }
}
