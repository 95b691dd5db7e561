use crate::format::readability::format_text_for_readability;
use crate::format::timestamp::format_timestamp;
use crate::transcript::{Chapter, VideoInfo};

/// Post-process a raw LLM summary into the final summary document:
/// reflow the body for readability, then prepend a video-info block and a
/// clickable chapter-index block when their inputs are available. Blocks
/// whose inputs are absent are omitted entirely.
pub fn finalize_summary(
    raw_summary: &str,
    chapters: Option<&[Chapter]>,
    video_id: Option<&str>,
    video_info: Option<&VideoInfo>,
) -> String {
    let formatted_summary = format_text_for_readability(raw_summary);

    let mut prefix_sections = Vec::new();

    if let (Some(info), Some(id)) = (video_info, video_id) {
        prefix_sections.push(video_info_section(info, id));
    }

    if let (Some(chapters), Some(id)) = (chapters, video_id) {
        if !chapters.is_empty() {
            prefix_sections.push(chapter_index_section(chapters, id));
        }
    }

    if prefix_sections.is_empty() {
        formatted_summary
    } else {
        format!("{}{}", prefix_sections.join(""), formatted_summary)
    }
}

/// Build the video-info block: title, uploader as a channel-search link,
/// duration, and a watch link. Missing fields drop their lines.
pub fn video_info_section(video_info: &VideoInfo, video_id: &str) -> String {
    let mut info = String::new();

    if let Some(title) = &video_info.title {
        info.push_str(&format!("🎥 **{}**\n\n", title));
    }

    if let Some(uploader) = &video_info.uploader {
        // No direct channel URL is available, so link a channel search
        let channel_search_url = format!(
            "https://www.youtube.com/results?search_query={}",
            uploader.replace(' ', "+")
        );
        info.push_str(&format!(
            "👤 Channel: [{}]({})\n",
            uploader, channel_search_url
        ));
    }

    if let Some(duration) = video_info.duration {
        let minutes = (duration / 60.0) as u64;
        let seconds = (duration % 60.0) as u64;
        info.push_str(&format!("⏱️ Duration: {}:{:02}\n", minutes, seconds));
    }

    let video_url = format!("https://www.youtube.com/watch?v={}", video_id);
    info.push_str(&format!("🔗 [Watch on YouTube]({})\n\n", video_url));

    info
}

/// Build the chapter-index block: a count header followed by one bullet
/// per chapter linking to the video at the chapter's start time.
pub fn chapter_index_section(chapters: &[Chapter], video_id: &str) -> String {
    let mut section = format!("📚 Video Chapters ({} chapters):\n\n", chapters.len());

    for chapter in chapters {
        let youtube_url = format!(
            "https://www.youtube.com/watch?v={}&t={}s",
            video_id, chapter.time as i64
        );
        section.push_str(&format!(
            "• [{}]({}) - {}\n",
            chapter.title,
            youtube_url,
            format_timestamp(chapter.time)
        ));
    }

    section
}
