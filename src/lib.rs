/// YouTube Transcript Summarizer - Rust Implementation
///
/// Library for persisting YouTube video metadata, transcripts and
/// AI-generated summaries, and for reflowing raw time-coded transcripts
/// into chapter-aware, paragraph-structured readable documents.

pub mod config;
pub mod error;
pub mod format;
pub mod llm;
pub mod metadata;
pub mod storage;
pub mod summarizer;
pub mod transcript;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Result, SummarizerError};
pub use crate::format::{
    format_text_for_readability, format_timestamp, format_timestamp_padded,
    format_transcript_for_readability,
};
pub use crate::llm::{create_llm, ChatMessage, Llm, LlmConfig, LlmResponse};
pub use crate::metadata::{MetadataConfig, MetadataExtractor};
pub use crate::storage::{StorageClient, StorageConfig, StorageStats, StoredVideoSummary};
pub use crate::summarizer::{TranscriptSummarizer, MAX_TRANSCRIPT_CHARS};
pub use crate::transcript::{
    extract_video_id, format_transcript_for_display, CachedVideo, Chapter, TranscriptEntry,
    VideoInfo,
};
