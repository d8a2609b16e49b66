pub mod confirm_popup;
pub mod footer;
pub mod header;
pub mod help_overlay;
mod helpers;
pub mod list_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear};
use regex::Regex;

use super::app::{App, Mode};

/// Main render function: draws the panel, then overlays
pub fn render(frame: &mut Frame, app: &mut App) {
    app.screen = frame.area();
    let area = app.widget_area();

    frame.render_widget(Clear, area);
    render_panel_background(frame, app, area);

    let border_style = if app.mode == Mode::Move {
        Style::default().fg(app.theme.highlight)
    } else {
        Style::default().fg(app.theme.border)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Layout: title + search (2 rows) | list | input row | footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    header::render_header(frame, app, chunks[0]);
    list_view::render_list(frame, app, chunks[1]);
    footer::render_input_row(frame, app, chunks[2]);
    footer::render_footer(frame, app, chunks[3]);

    if app.mode == Mode::Confirm {
        confirm_popup::render_confirm_popup(frame, app, area);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }
}

/// Shade each panel row along the opacity gradient
fn render_panel_background(frame: &mut Frame, app: &App, area: Rect) {
    let opacity = app.settings.opacity.percent();
    let buf = frame.buffer_mut();
    for dy in 0..area.height {
        let bg = app.theme.panel_bg(dy, area.height, opacity);
        buf.set_style(Rect::new(area.x, area.y + dy, area.width, 1), Style::default().bg(bg));
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || last_end == 0 {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// A one-line label padded so `right` ends flush with `width`
pub(super) fn split_line<'a>(left: Vec<Span<'a>>, right: Vec<Span<'a>>, width: usize) -> Line<'a> {
    let used = helpers::spans_width(&left) + helpers::spans_width(&right);
    let mut spans = left;
    if used < width {
        spans.push(Span::raw(" ".repeat(width - used)));
        spans.extend(right);
    }
    Line::from(spans)
}
