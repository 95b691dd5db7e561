/// Transcript-to-readable-document formatting pipeline
///
/// Takes a raw time-coded transcript plus optional chapter boundaries and
/// deterministically reflows it into paragraph-structured, chapter-organized
/// prose for human reading and LLM summarization input.
pub mod chapters;
pub mod paragraphs;
pub mod readability;
pub mod timestamp;

pub use chapters::{organize_by_chapters, CHAPTER_SENTENCES_PER_PARAGRAPH};
pub use paragraphs::{
    group_into_paragraphs, split_sentences, wrap_text, DEFAULT_SENTENCES_PER_PARAGRAPH,
    PARAGRAPH_WRAP_WIDTH,
};
pub use readability::{format_text_for_readability, READABILITY_WRAP_WIDTH};
pub use timestamp::{format_timestamp, format_timestamp_padded};

use crate::transcript::{Chapter, TranscriptEntry};

/// Format a transcript into readable text.
///
/// With chapters present the transcript is organized into chapter sections;
/// otherwise the entries are grouped into paragraphs directly. Returns an
/// empty string for an empty transcript; never fails.
pub fn format_transcript_for_readability(
    transcript: &[TranscriptEntry],
    chapters: Option<&[Chapter]>,
) -> String {
    if transcript.is_empty() {
        return String::new();
    }

    match chapters {
        Some(chapters) if !chapters.is_empty() => organize_by_chapters(transcript, chapters),
        _ => group_into_paragraphs(transcript, DEFAULT_SENTENCES_PER_PARAGRAPH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_transcript_yields_empty_string() {
        assert_eq!(format_transcript_for_readability(&[], None), "");
        let chapters = vec![Chapter::new("A", 0.0)];
        assert_eq!(
            format_transcript_for_readability(&[], Some(&chapters)),
            ""
        );
    }

    #[test]
    fn test_without_chapters_uses_paragraph_grouping() {
        let transcript = vec![TranscriptEntry::new("Hello there. How are you.", 0.0)];
        let formatted = format_transcript_for_readability(&transcript, None);
        assert_eq!(formatted, "Hello there. How are you.");
        assert!(!formatted.contains("<a id="));
    }

    #[test]
    fn test_with_chapters_emits_sections() {
        let transcript = vec![
            TranscriptEntry::new("Opening words.", 5.0),
            TranscriptEntry::new("Closing words.", 70.0),
        ];
        let chapters = vec![Chapter::new("Open", 0.0), Chapter::new("Close", 60.0)];

        let formatted = format_transcript_for_readability(&transcript, Some(&chapters));
        assert!(formatted.contains("## Open [00:00]"));
        assert!(formatted.contains("## Close [01:00]"));
    }

    #[test]
    fn test_empty_chapter_list_falls_back() {
        let transcript = vec![TranscriptEntry::new("Some words.", 0.0)];
        let formatted = format_transcript_for_readability(&transcript, Some(&[]));
        assert_eq!(formatted, "Some words.");
    }
}
