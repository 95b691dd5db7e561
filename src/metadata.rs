use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{Result, SummarizerError};
use crate::transcript::{Chapter, VideoInfo};

/// Metadata extraction configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MetadataConfig {
    /// Path to the yt-dlp executable
    pub ytdlp_path: String,
    /// HTTP proxy host:port for YouTube requests
    pub proxy: Option<String>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: "yt-dlp".to_string(),
            proxy: None,
        }
    }
}

/// Extracts video metadata (title, uploader, duration, chapters) by
/// invoking yt-dlp. All fields are optional downstream; every failure
/// mode degrades to an all-absent [`VideoInfo`] rather than an error.
pub struct MetadataExtractor {
    config: MetadataConfig,
}

impl MetadataExtractor {
    pub fn new(config: MetadataConfig) -> Self {
        Self { config }
    }

    /// Extract video info, degrading to the all-absent default on any
    /// failure (missing tool, network error, parse error).
    pub async fn extract(&self, video_id: &str) -> VideoInfo {
        match self.try_extract(video_id).await {
            Ok(info) => info,
            Err(e) => {
                warn!("Video info extraction failed for video {}: {}", video_id, e);
                VideoInfo::default()
            }
        }
    }

    async fn try_extract(&self, video_id: &str) -> Result<VideoInfo> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);

        let mut command = Command::new(&self.config.ytdlp_path);
        command
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-warnings")
            .arg("--quiet");

        if let Some(proxy) = &self.config.proxy {
            debug!("Using proxy for video info extraction: {}", proxy);
            command.arg("--proxy").arg(format!("http://{}", proxy));
        }

        let output = command.arg(&url).output().await?;

        if !output.status.success() {
            return Err(SummarizerError::MetadataExtraction {
                video_id: video_id.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let json: Value = serde_json::from_slice(&output.stdout)?;
        Ok(parse_video_info(&json))
    }
}

/// Map yt-dlp `--dump-json` output onto [`VideoInfo`]. Chapters come from
/// the `chapters` array of `{start_time, end_time, title}` objects; only
/// the start time and title are kept.
pub fn parse_video_info(json: &Value) -> VideoInfo {
    let chapters = json.get("chapters").and_then(|v| v.as_array()).map(|raw| {
        raw.iter()
            .filter_map(|chapter| {
                let time = chapter.get("start_time").and_then(|v| v.as_f64())?;
                let title = chapter
                    .get("title")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown Chapter");
                Some(Chapter::new(title, time))
            })
            .collect::<Vec<_>>()
    });

    VideoInfo {
        title: json
            .get("title")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        uploader: json
            .get("uploader")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        duration: json.get("duration").and_then(|v| v.as_f64()),
        chapters: chapters.filter(|c| !c.is_empty()),
        upload_date: json
            .get("upload_date")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_metadata() {
        let json = json!({
            "title": "A Video",
            "uploader": "A Channel",
            "duration": 305.0,
            "upload_date": "20240115",
            "chapters": [
                {"start_time": 0.0, "end_time": 60.0, "title": "Intro"},
                {"start_time": 60.0, "end_time": 305.0, "title": "Main"}
            ]
        });

        let info = parse_video_info(&json);
        assert_eq!(info.title.as_deref(), Some("A Video"));
        assert_eq!(info.uploader.as_deref(), Some("A Channel"));
        assert_eq!(info.duration, Some(305.0));
        assert_eq!(info.upload_date.as_deref(), Some("20240115"));

        let chapters = info.chapters.unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0], Chapter::new("Intro", 0.0));
        assert_eq!(chapters[1], Chapter::new("Main", 60.0));
    }

    #[test]
    fn test_parse_missing_fields_degrade_to_none() {
        let info = parse_video_info(&json!({}));
        assert_eq!(info, VideoInfo::default());
    }

    #[test]
    fn test_chapter_without_start_time_skipped() {
        let json = json!({
            "chapters": [
                {"title": "No start"},
                {"start_time": 10.0, "title": "Valid"}
            ]
        });

        let chapters = parse_video_info(&json).chapters.unwrap();
        assert_eq!(chapters, vec![Chapter::new("Valid", 10.0)]);
    }

    #[test]
    fn test_untitled_chapter_gets_placeholder() {
        let json = json!({"chapters": [{"start_time": 5.0}]});
        let chapters = parse_video_info(&json).chapters.unwrap();
        assert_eq!(chapters[0].title, "Unknown Chapter");
    }

    #[test]
    fn test_empty_chapter_array_is_absent() {
        let json = json!({"chapters": []});
        assert!(parse_video_info(&json).chapters.is_none());
    }

    #[tokio::test]
    async fn test_missing_tool_degrades_gracefully() {
        let extractor = MetadataExtractor::new(MetadataConfig {
            ytdlp_path: "/nonexistent/yt-dlp".to_string(),
            proxy: None,
        });

        let info = extractor.extract("dQw4w9WgXcQ").await;
        assert_eq!(info, VideoInfo::default());
    }
}
