use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::controller::ViewKind;
use crate::tui::app::{App, Mode};

use super::helpers::{CURSOR, tail_to_width};
use super::split_line;

/// Title row with the view toggle, then the search field
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let (title, toggle) = match app.view() {
        ViewKind::Active => ("\u{1F4DD} Todo", "History"),
        ViewKind::Archive => ("\u{1F4DC} History", "Todo"),
    };

    let title_style = Style::default()
        .fg(app.theme.text_bright)
        .add_modifier(Modifier::BOLD);
    let title_line = split_line(
        vec![Span::styled(format!(" {}", title), title_style)],
        vec![
            Span::styled("Tab ", Style::default().fg(app.theme.dim)),
            Span::styled(format!("{} ", toggle), Style::default().fg(app.theme.highlight)),
        ],
        width,
    );

    let search_text = app.controller.current_panel().search_text();
    let searching = app.mode == Mode::Search;
    let prefix = " \u{1F50D} ";
    let budget = width.saturating_sub(prefix.chars().count() + 2);
    let mut spans = vec![Span::styled(prefix, Style::default().fg(app.theme.dim))];
    if search_text.is_empty() && !searching {
        spans.push(Span::styled("Search...", Style::default().fg(app.theme.dim)));
    } else {
        spans.push(Span::styled(
            tail_to_width(search_text, budget).to_string(),
            Style::default().fg(app.theme.text),
        ));
        if searching {
            spans.push(Span::styled(CURSOR, Style::default().fg(app.theme.highlight)));
        }
    }

    let paragraph = Paragraph::new(vec![title_line, Line::from(spans)]);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use crate::tui::app::Mode;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn todo_title_offers_history() {
        let mut app = app_with_items(&[]);
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Todo"));
        assert!(out.contains("Tab History"));
        assert!(out.contains("Search..."));
    }

    #[test]
    fn history_title_offers_todo() {
        let mut app = app_with_items(&[]);
        app.controller.toggle_view().unwrap();
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("History"));
        assert!(out.contains("Tab Todo"));
    }

    #[test]
    fn search_field_shows_typed_text() {
        let mut app = app_with_items(&["buy milk"]);
        app.controller.on_search_active_changed("mil").unwrap();
        app.mode = Mode::Search;
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("mil\u{258C}"));
        assert!(!out.contains("Search..."));
    }
}
