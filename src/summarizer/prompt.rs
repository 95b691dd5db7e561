use crate::transcript::Chapter;

/// System message sent with every summarization request. The wording is a
/// contract with the model for consistent output structure.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that creates clear, \
comprehensive summaries of educational video transcripts. Focus on extracting key \
insights, actionable advice, and important details while maintaining readability.";

/// Build the summarization prompt: a fixed seven-section instructional
/// template with the transcript embedded at the end, plus a chapter
/// listing when chapters are available.
///
/// The section headings and their order must not change; downstream
/// consumers rely on the LLM reproducing this structure.
pub fn build_summary_prompt(transcript_content: &str, chapters: Option<&[Chapter]>) -> String {
    let mut prompt = format!(
        "Please provide a comprehensive summary of this YouTube video transcript. \
Structure your response with the following sections:

## Overview
Provide a brief 2-3 sentence overview of what this video is about.

## Main Topics Covered
List the primary topics or themes discussed in the video.

## Key Takeaways & Insights
Highlight the most important points, insights, or conclusions from the video.

## Actionable Strategies
If applicable, list any practical advice, strategies, or steps mentioned.

## Specific Details & Examples
Include important specific details, examples, statistics, or case studies mentioned.

## Warnings & Common Mistakes
If the video mentions any warnings, pitfalls, or common mistakes to avoid.

## Resources & Next Steps
Any resources, tools, or next steps mentioned in the video.

Here is the transcript to summarize:

{}
",
        transcript_content
    );

    if let Some(chapters) = chapters {
        if !chapters.is_empty() {
            let chapter_info = chapters
                .iter()
                .map(|ch| format!("- {} ({})", ch.title, render_seconds(ch.time)))
                .collect::<Vec<_>>()
                .join("\n");
            prompt.push_str(&format!("\n\nChapter structure:\n{}\n", chapter_info));
        }
    }

    prompt
}

/// Render chapter start seconds for the prompt listing: integral values
/// without a decimal point, fractional values as-is.
fn render_seconds(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{}", seconds as i64)
    } else {
        format!("{}", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTION_HEADINGS: [&str; 7] = [
        "## Overview",
        "## Main Topics Covered",
        "## Key Takeaways & Insights",
        "## Actionable Strategies",
        "## Specific Details & Examples",
        "## Warnings & Common Mistakes",
        "## Resources & Next Steps",
    ];

    #[test]
    fn test_all_sections_present_in_order() {
        let prompt = build_summary_prompt("some transcript", None);

        let mut last_position = 0;
        for heading in SECTION_HEADINGS {
            let position = prompt
                .find(heading)
                .unwrap_or_else(|| panic!("missing heading {}", heading));
            assert!(position > last_position, "{} out of order", heading);
            last_position = position;
        }
    }

    #[test]
    fn test_sections_present_regardless_of_content() {
        for content in ["", "x", "## Overview already here"] {
            let prompt = build_summary_prompt(content, None);
            for heading in SECTION_HEADINGS {
                assert!(prompt.contains(heading));
            }
        }
    }

    #[test]
    fn test_transcript_embedded_verbatim() {
        let prompt = build_summary_prompt("[00:05] unique transcript marker", None);
        assert!(prompt.contains("[00:05] unique transcript marker"));
        assert!(prompt.contains("Here is the transcript to summarize:"));
    }

    #[test]
    fn test_chapter_listing_appended() {
        let chapters = vec![Chapter::new("Intro", 0.0), Chapter::new("Main", 92.5)];
        let prompt = build_summary_prompt("text", Some(&chapters));

        assert!(prompt.contains("Chapter structure:"));
        assert!(prompt.contains("- Intro (0)"));
        assert!(prompt.contains("- Main (92.5)"));
    }

    #[test]
    fn test_no_chapter_listing_without_chapters() {
        assert!(!build_summary_prompt("text", None).contains("Chapter structure:"));
        assert!(!build_summary_prompt("text", Some(&[])).contains("Chapter structure:"));
    }
}
