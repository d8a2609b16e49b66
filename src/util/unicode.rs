use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

fn grapheme_width(g: &str) -> usize {
    if g == "\t" {
        return 4;
    }
    // Emoji sequences report per-codepoint widths; cap a cluster at 2 cells
    UnicodeWidthStr::width(g).min(2)
}

/// Truncate to `max_cells`, appending `…` if anything was cut.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = grapheme_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Break text into lines of at most `width` cells, preferring to break
/// after whitespace. Words longer than a line are split by grapheme.
pub fn wrap_to_width(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_w = 0;

    for word in s.split_word_bounds() {
        let word_w = display_width(word);
        if line_w + word_w <= width {
            line.push_str(word);
            line_w += word_w;
            continue;
        }
        if word.trim().is_empty() {
            // Whitespace at a break point is dropped
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line).trim_end().to_string());
                line_w = 0;
            }
            continue;
        }
        if !line.is_empty() && word_w <= width {
            lines.push(std::mem::take(&mut line).trim_end().to_string());
            line_w = 0;
        }
        for g in word.graphemes(true) {
            let w = grapheme_width(g);
            if line_w + w > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_w = 0;
            }
            line.push_str(g);
            line_w += w;
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Next grapheme boundary after `byte_offset`, or None at the end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    let g = s[byte_offset..].graphemes(true).next()?;
    Some(byte_offset + g.len())
}

/// Previous grapheme boundary before `byte_offset`, or None at the start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}

/// Display column of a byte offset.
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}
