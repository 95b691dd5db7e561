use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single timestamped fragment of spoken-text transcription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptEntry {
    /// Spoken text for this fragment
    pub text: String,
    /// Start time in seconds from the beginning of the video
    pub time: f64,
    /// Pre-rendered timestamp supplied by the transcript source, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_time: Option<String>,
}

impl TranscriptEntry {
    pub fn new(text: impl Into<String>, time: f64) -> Self {
        Self {
            text: text.into(),
            time,
            formatted_time: None,
        }
    }

    /// Timestamp used when rendering this entry as a `[MM:SS] text` line.
    /// Falls back to a zero-padded minutes:seconds rendering of `time`.
    pub fn display_time(&self) -> String {
        match &self.formatted_time {
            Some(ts) => ts.clone(),
            None => {
                let minutes = (self.time / 60.0) as u64;
                let seconds = (self.time % 60.0) as u64;
                format!("{:02}:{:02}", minutes, seconds)
            }
        }
    }
}

/// A named time range within a video, from upstream metadata extraction.
/// The implicit end of a chapter is the start of the next one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    /// Chapter title
    pub title: String,
    /// Chapter start in seconds
    pub time: f64,
}

impl Chapter {
    pub fn new(title: impl Into<String>, time: f64) -> Self {
        Self {
            title: title.into(),
            time,
        }
    }
}

/// Video metadata from the external extractor. Every field is optional;
/// a failed extraction yields the all-absent default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VideoInfo {
    pub title: Option<String>,
    pub uploader: Option<String>,
    /// Duration in seconds
    pub duration: Option<f64>,
    pub chapters: Option<Vec<Chapter>>,
    /// Upload date as reported by the extractor (YYYYMMDD)
    pub upload_date: Option<String>,
}

/// A fully cached video as reconstructed from storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedVideo {
    pub video_id: String,
    pub transcript: Vec<TranscriptEntry>,
    pub video_info: VideoInfo,
    pub formatted_transcript: String,
}

/// Extract an 11-character YouTube video ID from a URL, or pass one through.
///
/// Accepts `youtube.com/watch?v=`, `youtu.be/`, `youtube.com/embed/` URLs
/// and any youtube.com URL carrying a `v=` query parameter.
pub fn extract_video_id(url_or_id: &str) -> Option<String> {
    let id_pattern = Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap();
    if id_pattern.is_match(url_or_id) {
        return Some(url_or_id.to_string());
    }

    let url_patterns = [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([a-zA-Z0-9_-]{11})",
        r"youtube\.com/.*[?&]v=([a-zA-Z0-9_-]{11})",
    ];

    for pattern in url_patterns {
        let re = Regex::new(pattern).unwrap();
        if let Some(captures) = re.captures(url_or_id) {
            return Some(captures[1].to_string());
        }
    }

    None
}

/// Format transcript entries as `[MM:SS] text` lines, one per entry.
/// This is both the display form and the annotated text sent to the LLM.
pub fn format_transcript_for_display(transcript: &[TranscriptEntry]) -> String {
    transcript
        .iter()
        .map(|entry| format!("[{}] {}", entry.display_time(), entry.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id_from_bare_id() {
        assert_eq!(
            extract_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_video_id_from_urls() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?list=PL123&v=dQw4w9WgXcQ",
        ];

        for url in urls {
            assert_eq!(
                extract_video_id(url),
                Some("dQw4w9WgXcQ".to_string()),
                "failed for {}",
                url
            );
        }
    }

    #[test]
    fn test_extract_video_id_rejects_junk() {
        assert_eq!(extract_video_id("not a video"), None);
        assert_eq!(extract_video_id("https://example.com/watch?v=short"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_display_time_fallback() {
        let entry = TranscriptEntry::new("hello", 125.7);
        assert_eq!(entry.display_time(), "02:05");

        let mut entry = TranscriptEntry::new("hello", 125.7);
        entry.formatted_time = Some("2:05".to_string());
        assert_eq!(entry.display_time(), "2:05");
    }

    #[test]
    fn test_format_for_display() {
        let transcript = vec![
            TranscriptEntry::new("first", 0.0),
            TranscriptEntry::new("second", 65.0),
        ];

        let formatted = format_transcript_for_display(&transcript);
        assert_eq!(formatted, "[00:00] first\n[01:05] second");
    }

    #[test]
    fn test_transcript_entry_serialization() {
        let entry = TranscriptEntry::new("hello world", 12.5);
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: TranscriptEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
        // Absent formatted_time is omitted from the wire form
        assert!(!json.contains("formatted_time"));
    }
}
