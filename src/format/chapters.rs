use crate::format::paragraphs::{group_into_paragraphs, DEFAULT_SENTENCES_PER_PARAGRAPH};
use crate::format::timestamp::format_timestamp_padded;
use crate::transcript::{Chapter, TranscriptEntry};

/// Sentences per paragraph inside chapter sections. Denser than the
/// standalone default so chapter-bounded sections stay compact.
pub const CHAPTER_SENTENCES_PER_PARAGRAPH: usize = 4;

/// Organize transcript entries into chapter-bounded sections.
///
/// Chapters are sorted by start time first, so for strictly increasing
/// starts the bucketing is an exact partition: each entry lands in the
/// last chapter whose start is at or before the entry's time. Entries
/// before the first chapter start are dropped. Empty buckets emit no
/// section.
///
/// Each section carries a header with an HTML anchor derived from the
/// chapter start (`chapter-<start_int>`), the title and a zero-padded
/// timestamp, followed by the bucket's paragraphs.
pub fn organize_by_chapters(transcript: &[TranscriptEntry], chapters: &[Chapter]) -> String {
    if chapters.is_empty() {
        return group_into_paragraphs(transcript, DEFAULT_SENTENCES_PER_PARAGRAPH);
    }

    let mut sorted_chapters: Vec<&Chapter> = chapters.iter().collect();
    sorted_chapters.sort_by(|a, b| a.time.total_cmp(&b.time));

    let mut sections = Vec::new();

    for (i, chapter) in sorted_chapters.iter().enumerate() {
        let start = chapter.time;
        let end = sorted_chapters
            .get(i + 1)
            .map(|next| next.time)
            .unwrap_or(f64::INFINITY);

        let chapter_entries: Vec<TranscriptEntry> = transcript
            .iter()
            .filter(|entry| start <= entry.time && entry.time < end)
            .cloned()
            .collect();

        if chapter_entries.is_empty() {
            continue;
        }

        let header = format!(
            "\n<a id='chapter-{}'></a>## {} [{}]\n",
            start as i64,
            chapter.title,
            format_timestamp_padded(start)
        );
        let content = group_into_paragraphs(&chapter_entries, CHAPTER_SENTENCES_PER_PARAGRAPH);

        sections.push(format!("{}{}", header, content));
    }

    sections.join("\n\n")
}
