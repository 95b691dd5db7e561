use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, SummarizerError};
use crate::transcript::{CachedVideo, Chapter, TranscriptEntry, VideoInfo};

/// Transcript language recorded with stored rows
const DEFAULT_LANGUAGE: &str = "en";

/// Supabase storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Supabase project URL
    pub url: Option<String>,
    /// Supabase API key
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_storage_timeout")]
    pub timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_seconds: default_storage_timeout(),
        }
    }
}

fn default_storage_timeout() -> u64 {
    30
}

impl StorageConfig {
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.api_key.is_some()
    }
}

/// Storage client over the Supabase PostgREST API.
///
/// Persists video metadata, transcripts, chapters and summaries keyed by
/// video id. Constructs in a disabled mode when credentials are absent:
/// reads report "not cached" and writes fail with a "not configured"
/// error, so callers degrade gracefully.
pub struct StorageClient {
    backend: Option<Backend>,
}

struct Backend {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

/// Summary of one stored video, for listings
#[derive(Debug, Clone, Serialize)]
pub struct StoredVideoSummary {
    pub video_id: String,
    pub title: String,
    pub uploader: String,
    pub duration: Option<f64>,
    pub chapters_count: usize,
    pub transcript_entries: usize,
    pub has_summary: bool,
    pub created_at: Option<String>,
}

/// Row counts across storage tables
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageStats {
    pub configured: bool,
    pub videos: usize,
    pub transcripts: usize,
    pub summaries: usize,
}

#[derive(Serialize)]
struct NewVideoRow<'a> {
    video_id: &'a str,
    title: Option<&'a str>,
    uploader: Option<&'a str>,
    duration: Option<f64>,
    thumbnail_url: String,
    updated_at: String,
}

#[derive(Serialize)]
struct NewTranscriptRow<'a> {
    video_id: &'a str,
    transcript_data: &'a [TranscriptEntry],
    formatted_transcript: &'a str,
    language_used: &'a str,
    updated_at: String,
}

#[derive(Serialize)]
struct NewChaptersRow<'a> {
    video_id: &'a str,
    chapters_data: &'a [Chapter],
    updated_at: String,
}

#[derive(Serialize)]
struct NewSummaryRow<'a> {
    video_id: &'a str,
    summary_text: &'a str,
    model_used: &'a str,
    updated_at: String,
}

#[derive(Deserialize)]
struct VideoRow {
    video_id: String,
    title: Option<String>,
    uploader: Option<String>,
    duration: Option<f64>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptRow {
    #[serde(default)]
    transcript_data: Vec<TranscriptEntry>,
    #[serde(default)]
    formatted_transcript: Option<String>,
}

#[derive(Deserialize)]
struct ChaptersRow {
    #[serde(default)]
    chapters_data: Vec<Chapter>,
}

#[derive(Deserialize)]
struct SummaryRow {
    summary_text: String,
}

#[derive(Deserialize)]
struct VideoListRow {
    video_id: String,
    title: Option<String>,
    uploader: Option<String>,
    duration: Option<f64>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    transcripts: Vec<TranscriptRow>,
    #[serde(default)]
    summaries: Vec<SummaryRow>,
    #[serde(default)]
    video_chapters: Vec<ChaptersRow>,
}

impl StorageClient {
    /// Create a storage client. Missing credentials produce a disabled
    /// client rather than an error.
    pub fn new(config: StorageConfig) -> Self {
        let backend = match (&config.url, &config.api_key) {
            (Some(url), Some(api_key)) => {
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.timeout_seconds))
                    .build();

                match client {
                    Ok(client) => Some(Backend {
                        base_url: url.trim_end_matches('/').to_string(),
                        api_key: api_key.clone(),
                        client,
                    }),
                    Err(e) => {
                        warn!("Failed to build storage HTTP client: {}", e);
                        None
                    }
                }
            }
            _ => {
                warn!("SUPABASE_URL and SUPABASE_API_KEY not set, storage is disabled");
                None
            }
        };

        Self { backend }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Get cached transcript data for a video. Any remote failure is
    /// logged and reported as a miss.
    pub async fn get(&self, video_id: &str) -> Option<CachedVideo> {
        let backend = match &self.backend {
            Some(backend) => backend,
            None => {
                debug!("Storage not configured, cannot get video {}", video_id);
                return None;
            }
        };

        let video_rows: Vec<VideoRow> = match backend
            .select("youtube_videos", &[("video_id", &format!("eq.{}", video_id))])
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Storage read error for {}: {}", video_id, e);
                return None;
            }
        };

        let video_row = match video_rows.into_iter().next() {
            Some(row) => row,
            None => {
                debug!("Storage MISS for video {}", video_id);
                return None;
            }
        };

        let transcript_rows: Vec<TranscriptRow> = match backend
            .select("transcripts", &[("video_id", &format!("eq.{}", video_id))])
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Storage read error for {}: {}", video_id, e);
                return None;
            }
        };

        let transcript_row = match transcript_rows.into_iter().next() {
            Some(row) => row,
            None => {
                debug!("Storage MISS - no transcript for video {}", video_id);
                return None;
            }
        };

        // Chapters are optional; a failed read degrades to none.
        let chapters = backend
            .select::<ChaptersRow>("video_chapters", &[("video_id", &format!("eq.{}", video_id))])
            .await
            .ok()
            .and_then(|rows| rows.into_iter().next())
            .map(|row| row.chapters_data);

        info!("Storage HIT for video {}", video_id);

        Some(CachedVideo {
            video_id: video_row.video_id,
            transcript: transcript_row.transcript_data,
            video_info: VideoInfo {
                title: video_row.title,
                uploader: video_row.uploader,
                duration: video_row.duration,
                chapters,
                upload_date: None,
            },
            formatted_transcript: transcript_row.formatted_transcript.unwrap_or_default(),
        })
    }

    /// Store transcript data for a video. Write failures propagate so the
    /// caller can decide whether to retry or continue uncached.
    pub async fn set(
        &self,
        video_id: &str,
        transcript: &[TranscriptEntry],
        video_info: &VideoInfo,
        formatted_transcript: &str,
    ) -> Result<()> {
        let backend = self.require_backend()?;
        let now = Utc::now().to_rfc3339();

        let video_row = NewVideoRow {
            video_id,
            title: video_info.title.as_deref(),
            uploader: video_info.uploader.as_deref(),
            duration: video_info.duration,
            thumbnail_url: format!(
                "https://img.youtube.com/vi/{}/maxresdefault.jpg",
                video_id
            ),
            updated_at: now.clone(),
        };
        backend.upsert("youtube_videos", video_id, &video_row).await?;

        let transcript_row = NewTranscriptRow {
            video_id,
            transcript_data: transcript,
            formatted_transcript,
            language_used: DEFAULT_LANGUAGE,
            updated_at: now.clone(),
        };
        backend.delete("transcripts", video_id).await?;
        backend.insert("transcripts", video_id, &transcript_row).await?;

        if let Some(chapters) = &video_info.chapters {
            if !chapters.is_empty() {
                let chapters_row = NewChaptersRow {
                    video_id,
                    chapters_data: chapters,
                    updated_at: now,
                };
                backend.delete("video_chapters", video_id).await?;
                backend
                    .insert("video_chapters", video_id, &chapters_row)
                    .await?;
                debug!("Saved {} chapters for {}", chapters.len(), video_id);
            }
        }

        info!("Storage SAVED for video {}", video_id);
        Ok(())
    }

    /// Save an AI summary for a video
    pub async fn save_summary(
        &self,
        video_id: &str,
        summary: &str,
        model_used: &str,
    ) -> Result<()> {
        let backend = self.require_backend()?;

        let row = NewSummaryRow {
            video_id,
            summary_text: summary,
            model_used,
            updated_at: Utc::now().to_rfc3339(),
        };
        backend.delete("summaries", video_id).await?;
        backend.insert("summaries", video_id, &row).await?;

        info!("Summary saved for video {}", video_id);
        Ok(())
    }

    /// Get a saved summary, or `None` when absent or on any remote failure
    pub async fn get_summary(&self, video_id: &str) -> Option<String> {
        let backend = match &self.backend {
            Some(backend) => backend,
            None => {
                debug!("Storage not configured, cannot get summary for {}", video_id);
                return None;
            }
        };

        let rows: Vec<SummaryRow> = match backend
            .select(
                "summaries",
                &[
                    ("video_id", &format!("eq.{}", video_id)),
                    ("select", "summary_text"),
                ],
            )
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Error getting summary for {}: {}", video_id, e);
                return None;
            }
        };

        rows.into_iter().next().map(|row| row.summary_text)
    }

    /// Delete a video and all dependent rows
    pub async fn delete_video(&self, video_id: &str) -> Result<()> {
        let backend = self.require_backend()?;

        for table in ["summaries", "video_chapters", "transcripts", "youtube_videos"] {
            backend.delete(table, video_id).await?;
        }

        info!("Deleted stored data for video {}", video_id);
        Ok(())
    }

    /// List all stored videos, newest first. Failures yield an empty list.
    pub async fn list_cached_videos(&self) -> Vec<StoredVideoSummary> {
        let backend = match &self.backend {
            Some(backend) => backend,
            None => return Vec::new(),
        };

        let rows: Vec<VideoListRow> = match backend
            .select(
                "youtube_videos",
                &[
                    (
                        "select",
                        "*,transcripts(transcript_data),summaries(summary_text),video_chapters(chapters_data)",
                    ),
                    ("order", "created_at.desc"),
                ],
            )
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Error listing stored videos: {}", e);
                return Vec::new();
            }
        };

        rows.into_iter()
            .map(|row| StoredVideoSummary {
                video_id: row.video_id,
                title: row.title.unwrap_or_else(|| "Unknown Title".to_string()),
                uploader: row
                    .uploader
                    .unwrap_or_else(|| "Unknown Channel".to_string()),
                duration: row.duration,
                chapters_count: row
                    .video_chapters
                    .first()
                    .map(|c| c.chapters_data.len())
                    .unwrap_or(0),
                transcript_entries: row
                    .transcripts
                    .first()
                    .map(|t| t.transcript_data.len())
                    .unwrap_or(0),
                has_summary: !row.summaries.is_empty(),
                created_at: row.created_at,
            })
            .collect()
    }

    /// Row counts across storage tables. Zeros when disabled or failing.
    pub async fn stats(&self) -> StorageStats {
        let backend = match &self.backend {
            Some(backend) => backend,
            None => return StorageStats::default(),
        };

        let mut stats = StorageStats {
            configured: true,
            ..StorageStats::default()
        };

        stats.videos = backend.count_rows("youtube_videos").await;
        stats.transcripts = backend.count_rows("transcripts").await;
        stats.summaries = backend.count_rows("summaries").await;

        stats
    }

    fn require_backend(&self) -> Result<&Backend> {
        self.backend.as_ref().ok_or(SummarizerError::NotConfigured {
            service: "storage",
            reason: "SUPABASE_URL and SUPABASE_API_KEY are not set".to_string(),
        })
    }
}

impl Backend {
    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let response = self
            .authed(self.client.get(self.table_url(table)))
            .query(query)
            .send()
            .await?;

        let response = Self::check_status(response, table, "select").await?;
        Ok(response.json().await?)
    }

    async fn insert<T: Serialize>(&self, table: &str, video_id: &str, row: &T) -> Result<()> {
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .json(row)
            .send()
            .await
            .map_err(|e| Self::write_error(video_id, table, &e.to_string()))?;

        Self::check_write_status(response, table, video_id).await
    }

    async fn upsert<T: Serialize>(&self, table: &str, video_id: &str, row: &T) -> Result<()> {
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .query(&[("on_conflict", "video_id")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(row)
            .send()
            .await
            .map_err(|e| Self::write_error(video_id, table, &e.to_string()))?;

        Self::check_write_status(response, table, video_id).await
    }

    async fn delete(&self, table: &str, video_id: &str) -> Result<()> {
        let response = self
            .authed(self.client.delete(self.table_url(table)))
            .query(&[("video_id", format!("eq.{}", video_id))])
            .send()
            .await
            .map_err(|e| Self::write_error(video_id, table, &e.to_string()))?;

        Self::check_write_status(response, table, video_id).await
    }

    async fn count_rows(&self, table: &str) -> usize {
        match self
            .select::<serde_json::Value>(table, &[("select", "video_id")])
            .await
        {
            Ok(rows) => rows.len(),
            Err(e) => {
                warn!("Error counting rows in {}: {}", table, e);
                0
            }
        }
    }

    async fn check_status(
        response: reqwest::Response,
        table: &str,
        action: &str,
    ) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(SummarizerError::Storage {
            reason: format!("{} on {} failed with {}: {}", action, table, status, body),
        })
    }

    async fn check_write_status(
        response: reqwest::Response,
        table: &str,
        video_id: &str,
    ) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::write_error(
            video_id,
            table,
            &format!("{}: {}", status, body),
        ))
    }

    fn write_error(video_id: &str, table: &str, reason: &str) -> SummarizerError {
        SummarizerError::Storage {
            reason: format!("write to {} failed for {}: {}", table, video_id, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled_client() -> StorageClient {
        StorageClient::new(StorageConfig::default())
    }

    #[test]
    fn test_missing_credentials_disable_client() {
        assert!(!disabled_client().is_configured());

        let partial = StorageConfig {
            url: Some("https://project.supabase.co".to_string()),
            api_key: None,
            timeout_seconds: 30,
        };
        assert!(!StorageClient::new(partial).is_configured());
    }

    #[tokio::test]
    async fn test_disabled_reads_report_absent() {
        let client = disabled_client();
        assert!(client.get("dQw4w9WgXcQ").await.is_none());
        assert!(client.get_summary("dQw4w9WgXcQ").await.is_none());
        assert!(client.list_cached_videos().await.is_empty());
        assert!(!client.stats().await.configured);
    }

    #[tokio::test]
    async fn test_disabled_writes_fail_with_not_configured() {
        let client = disabled_client();

        let result = client
            .set("dQw4w9WgXcQ", &[], &VideoInfo::default(), "")
            .await;
        assert!(matches!(
            result,
            Err(SummarizerError::NotConfigured { service: "storage", .. })
        ));

        let result = client.save_summary("dQw4w9WgXcQ", "summary", "gpt-4").await;
        assert!(matches!(
            result,
            Err(SummarizerError::NotConfigured { .. })
        ));
    }

    #[test]
    fn test_video_row_wire_columns() {
        let row = NewVideoRow {
            video_id: "dQw4w9WgXcQ",
            title: Some("A Title"),
            uploader: Some("A Channel"),
            duration: Some(212.0),
            thumbnail_url: "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&row).unwrap();
        for column in ["video_id", "title", "uploader", "duration", "thumbnail_url", "updated_at"] {
            assert!(json.get(column).is_some(), "missing column {}", column);
        }
        assert_eq!(
            json["thumbnail_url"],
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
    }

    #[test]
    fn test_transcript_row_wire_columns() {
        let entries = vec![TranscriptEntry::new("hello", 1.0)];
        let row = NewTranscriptRow {
            video_id: "dQw4w9WgXcQ",
            transcript_data: &entries,
            formatted_transcript: "hello.",
            language_used: DEFAULT_LANGUAGE,
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["language_used"], "en");
        assert_eq!(json["transcript_data"][0]["text"], "hello");
        assert_eq!(json["formatted_transcript"], "hello.");
    }

    /// Minimal HTTP stub that answers 404 to every request.
    async fn spawn_not_found_server() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    )
                    .await;
            }
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_failed_writes_surface_storage_errors() {
        let url = spawn_not_found_server().await;
        let client = StorageClient::new(StorageConfig {
            url: Some(url),
            api_key: Some("test-key".to_string()),
            timeout_seconds: 5,
        });

        // A write that never reached the table must not report success.
        let result = client.save_summary("dQw4w9WgXcQ", "summary", "gpt-4").await;
        assert!(
            matches!(result, Err(SummarizerError::Storage { .. })),
            "expected storage error, got {:?}",
            result
        );

        let result = client
            .set(
                "dQw4w9WgXcQ",
                &[TranscriptEntry::new("hello", 0.0)],
                &VideoInfo::default(),
                "hello.",
            )
            .await;
        assert!(
            matches!(result, Err(SummarizerError::Storage { .. })),
            "expected storage error, got {:?}",
            result
        );
    }

    #[test]
    fn test_list_row_deserializes_embedded_tables() {
        let json = serde_json::json!({
            "video_id": "dQw4w9WgXcQ",
            "title": null,
            "uploader": "Channel",
            "duration": 100.0,
            "created_at": "2024-01-01T00:00:00Z",
            "transcripts": [{"transcript_data": [{"text": "a", "time": 0.0}]}],
            "summaries": [{"summary_text": "s"}],
            "video_chapters": [{"chapters_data": [{"title": "c", "time": 0.0}]}]
        });

        let row: VideoListRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.transcripts[0].transcript_data.len(), 1);
        assert_eq!(row.video_chapters[0].chapters_data.len(), 1);
        assert!(!row.summaries.is_empty());
        assert!(row.title.is_none());
    }
}
