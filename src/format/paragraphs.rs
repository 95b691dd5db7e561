use regex::Regex;

use crate::transcript::TranscriptEntry;

/// Column width for grouped transcript paragraphs
pub const PARAGRAPH_WRAP_WIDTH: usize = 100;

/// Default number of sentences batched into one paragraph
pub const DEFAULT_SENTENCES_PER_PARAGRAPH: usize = 5;

/// Split text into sentences on runs of `.`, `!` or `?` followed by
/// whitespace or end of input.
///
/// This is a punctuation heuristic: abbreviations, decimal numbers and
/// quoted punctuation are split naively. That is a known limitation of
/// the upstream transcript pipeline, not something to correct here.
pub fn split_sentences(text: &str) -> Vec<String> {
    let sentence_endings = Regex::new(r"[.!?]+(?:\s|$)").unwrap();

    sentence_endings
        .split(text)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Word-wrap text at the given column width without breaking words.
/// Width is measured in characters, not bytes, so non-ASCII prose wraps
/// at the same columns as ASCII. Words longer than the width land on
/// their own line intact.
pub fn wrap_text(text: &str, width: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in words {
        let word_width = word.chars().count();
        if current_line.is_empty() {
            current_line = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(current_line);
            current_line = word.to_string();
            current_width = word_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines.join("\n")
}

/// Group transcript entries into readable paragraphs.
///
/// All entry text is joined with single spaces, segmented into sentences,
/// and batched `sentences_per_paragraph` at a time. Each batch is joined
/// with `". "`, given a trailing period if missing, and wrapped at 100
/// columns. Paragraphs are separated by a blank line.
pub fn group_into_paragraphs(
    transcript: &[TranscriptEntry],
    sentences_per_paragraph: usize,
) -> String {
    let full_text = transcript
        .iter()
        .map(|entry| entry.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let sentences = split_sentences(&full_text);

    let mut paragraphs = Vec::new();
    let mut current_paragraph: Vec<&str> = Vec::new();

    for (i, sentence) in sentences.iter().enumerate() {
        current_paragraph.push(sentence);

        if current_paragraph.len() >= sentences_per_paragraph || i == sentences.len() - 1 {
            let mut paragraph_text = current_paragraph.join(". ");
            if !paragraph_text.is_empty() && !paragraph_text.ends_with('.') {
                paragraph_text.push('.');
            }

            paragraphs.push(wrap_text(&paragraph_text, PARAGRAPH_WRAP_WIDTH));
            current_paragraph.clear();
        }
    }

    paragraphs.join("\n\n")
}
