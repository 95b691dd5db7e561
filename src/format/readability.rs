use crate::format::paragraphs::wrap_text;

/// Column width for readability-formatted prose
pub const READABILITY_WRAP_WIDTH: usize = 80;

/// Line prefixes preserved verbatim (markdown list items)
const LIST_MARKERS: [&str; 5] = ["- ", "* ", "1. ", "2. ", "3. "];

/// Reflow free text for readability while preserving structural markers.
///
/// Lines are processed independently: blank lines stay blank, list items
/// and markdown headers pass through untouched, and everything else is
/// word-wrapped at 80 columns. Line order and blank-line placement are
/// preserved, so running the formatter over its own output is a no-op.
pub fn format_text_for_readability(text: &str) -> String {
    let mut formatted_lines = Vec::new();

    for line in text.split('\n') {
        let line = line.trim();

        if line.is_empty() {
            formatted_lines.push(String::new());
            continue;
        }

        if LIST_MARKERS.iter().any(|m| line.starts_with(m)) || line.starts_with('#') {
            formatted_lines.push(line.to_string());
        } else {
            formatted_lines.push(wrap_text(line, READABILITY_WRAP_WIDTH));
        }
    }

    formatted_lines.join("\n")
}
