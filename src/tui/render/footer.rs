use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::controller::ViewKind;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::{tail_to_width, with_cursor};
use super::split_line;

/// The add box on the Todo list, an action hint on History
pub fn render_input_row(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let line = match (app.view(), app.mode) {
        (_, Mode::Add) => {
            let text = with_cursor(&app.edit_buffer, app.edit_cursor);
            Line::from(vec![
                Span::styled(" + ", Style::default().fg(app.theme.highlight)),
                Span::styled(
                    tail_to_width(&text, width.saturating_sub(4)).to_string(),
                    Style::default().fg(app.theme.text_bright),
                ),
            ])
        }
        (ViewKind::Active, _) => Line::from(Span::styled(
            " + Add Todo...",
            Style::default().fg(app.theme.dim),
        )),
        (ViewKind::Archive, _) => Line::from(vec![
            Span::styled(" r ", Style::default().fg(app.theme.highlight)),
            Span::styled("restore  ", Style::default().fg(app.theme.dim)),
            Span::styled("C ", Style::default().fg(app.theme.red)),
            Span::styled("clear all", Style::default().fg(app.theme.dim)),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Count label on the left; status message or key hint on the right
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let label = app.controller.current_panel().count_label();
    let left = vec![Span::styled(
        format!(" {}", label),
        Style::default().fg(app.theme.dim),
    )];

    let (hint, style) = match (&app.status_message, app.mode) {
        (_, Mode::Move) => (
            "arrows move  Enter done".to_string(),
            Style::default().fg(app.theme.highlight),
        ),
        (Some(msg), _) => {
            let color = if app.status_is_error {
                app.theme.red
            } else {
                app.theme.green
            };
            (msg.clone(), Style::default().fg(color))
        }
        (None, Mode::Search) => (
            "Enter keep  Esc clear".to_string(),
            Style::default().fg(app.theme.dim),
        ),
        (None, Mode::Add) => (
            "Enter add  Esc cancel".to_string(),
            Style::default().fg(app.theme.dim),
        ),
        (None, Mode::Edit) => ("Enter save".to_string(), Style::default().fg(app.theme.dim)),
        (None, _) => ("? help".to_string(), Style::default().fg(app.theme.dim)),
    };

    let room = width.saturating_sub(unicode::display_width(&left[0].content) + 2);
    let hint = unicode::truncate_to_width(&hint, room);
    let line = split_line(left, vec![Span::styled(format!("{} ", hint), style)], width);
    frame.render_widget(Paragraph::new(line), area);
}
