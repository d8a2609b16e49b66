use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::controller::{Row, RowKind};
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::{search_regex, with_cursor};
use super::push_highlighted_spans;

/// Selection gutter (2), checkbox or check mark (3), one space
const PREFIX_WIDTH: usize = 6;

/// Render the current list, keeping the cursor row on screen
pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let panel = app.controller.current_panel();
    if panel.rows().is_empty() {
        let msg = if !panel.search_text().trim().is_empty() {
            "No matches"
        } else {
            match panel.kind() {
                RowKind::Active => "Nothing to do",
                RowKind::Archive => "No history yet",
            }
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            msg,
            Style::default().fg(app.theme.dim),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(empty, Rect { height: 1.min(area.height), ..area });
        return;
    }

    let text_width = (area.width as usize).saturating_sub(PREFIX_WIDTH).max(1);
    let cursor = app.list_state().cursor;
    let search_re = search_regex(panel.search_text());
    let editing = app.mode == Mode::Edit;

    let rendered: Vec<Vec<Line>> = panel
        .rows()
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let buffer = (editing && row.editing).then_some((app.edit_buffer.as_str(), app.edit_cursor));
            row_lines(app, row, idx == cursor, buffer, text_width, search_re.as_ref())
        })
        .collect();

    let heights: Vec<usize> = rendered.iter().map(Vec::len).collect();
    let scroll = scroll_for_cursor(&heights, cursor, app.list_state().scroll_offset, area.height as usize);
    app.list_state_mut().scroll_offset = scroll;

    let lines: Vec<Line> = rendered
        .into_iter()
        .skip(scroll)
        .flatten()
        .take(area.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// First row to draw so the cursor row is fully visible
fn scroll_for_cursor(heights: &[usize], cursor: usize, offset: usize, visible: usize) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let cursor = cursor.min(heights.len() - 1);
    let mut offset = offset.min(cursor);
    while offset < cursor && heights[offset..=cursor].iter().sum::<usize>() > visible {
        offset += 1;
    }
    offset
}

fn row_lines<'a>(
    app: &App,
    row: &Row,
    selected: bool,
    edit: Option<(&str, usize)>,
    text_width: usize,
    search_re: Option<&regex::Regex>,
) -> Vec<Line<'a>> {
    let theme = &app.theme;
    let row_bg = selected.then_some(theme.selection_bg);
    let with_bg = |style: Style| match row_bg {
        Some(bg) => style.bg(bg),
        None => style,
    };

    let gutter = if selected { " \u{25B8}" } else { "  " };
    let (mark, mark_style) = match (row.kind(), row.completing) {
        (RowKind::Active, false) => ("[ ]", Style::default().fg(theme.text)),
        (RowKind::Active, true) => ("[x]", Style::default().fg(theme.green)),
        (RowKind::Archive, _) => (" \u{2713} ", Style::default().fg(theme.green)),
    };

    let text_style = match (row.kind(), row.completing) {
        (RowKind::Active, false) => Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD),
        (RowKind::Active, true) => Style::default()
            .fg(theme.done)
            .add_modifier(Modifier::CROSSED_OUT),
        (RowKind::Archive, _) => Style::default().fg(theme.text),
    };
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);

    let (wrapped, highlight) = match edit {
        Some((buffer, cursor)) => (
            unicode::wrap_to_width(&with_cursor(buffer, cursor), text_width),
            None,
        ),
        None => (unicode::wrap_to_width(&row.content, text_width), search_re),
    };
    let text_style = if edit.is_some() {
        Style::default().fg(theme.text_bright).add_modifier(Modifier::UNDERLINED)
    } else {
        text_style
    };

    wrapped
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut spans = if i == 0 {
                vec![
                    Span::styled(gutter, with_bg(Style::default().fg(theme.highlight))),
                    Span::styled(mark, with_bg(mark_style)),
                ]
            } else {
                vec![Span::styled(" ".repeat(PREFIX_WIDTH), with_bg(Style::default()))]
            };
            if i == 0 {
                spans.push(Span::styled(" ", with_bg(Style::default())));
            }
            push_highlighted_spans(&mut spans, chunk, with_bg(text_style), match_style, highlight);
            let used = PREFIX_WIDTH + unicode::display_width(chunk);
            if selected && used < PREFIX_WIDTH + text_width {
                spans.push(Span::styled(
                    " ".repeat(PREFIX_WIDTH + text_width - used),
                    with_bg(Style::default()),
                ));
            }
            Line::from(spans)
        })
        .collect()
}
