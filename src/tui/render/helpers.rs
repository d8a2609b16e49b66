use ratatui::text::Span;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode;

/// Text cursor glyph drawn inside input fields
pub(super) const CURSOR: &str = "\u{258C}";

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Input text with the cursor glyph spliced in at byte offset `cursor`
pub(super) fn with_cursor(text: &str, cursor: usize) -> String {
    let cursor = cursor.min(text.len());
    let mut out = String::with_capacity(text.len() + CURSOR.len());
    out.push_str(&text[..cursor]);
    out.push_str(CURSOR);
    out.push_str(&text[cursor..]);
    out
}

/// The last `max_cells` worth of `text`, so the end of a long input stays
/// visible.
pub(super) fn tail_to_width(text: &str, max_cells: usize) -> &str {
    if unicode::display_width(text) <= max_cells {
        return text;
    }
    let mut used = 0;
    let mut start = text.len();
    for (idx, g) in text.grapheme_indices(true).rev() {
        let w = unicode::display_width(g);
        if used + w > max_cells {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

/// Case-insensitive literal matcher for the search keyword, if any
pub(super) fn search_regex(search_text: &str) -> Option<Regex> {
    let keyword = search_text.trim();
    if keyword.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(keyword))).ok()
}
