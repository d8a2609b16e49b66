use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, ConfirmAction};

const POPUP_WIDTH: u16 = 28;
const POPUP_HEIGHT: u16 = 5;

/// y/n prompt centered on the widget
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(action) = app.confirm else {
        return;
    };
    let question = match action {
        ConfirmAction::ClearHistory => "Clear all history?",
    };

    let w = POPUP_WIDTH.min(area.width);
    let h = POPUP_HEIGHT.min(area.height);
    let popup = Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    );
    frame.render_widget(Clear, popup);

    let bg = app.theme.background;
    let lines = vec![
        Line::from(Span::styled(
            question,
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(app.theme.red)),
            Span::styled(" yes   ", Style::default().fg(app.theme.text)),
            Span::styled("n", Style::default().fg(app.theme.highlight)),
            Span::styled(" no", Style::default().fg(app.theme.text)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use crate::tui::app::{ConfirmAction, Mode};
    use crate::tui::render::test_helpers::*;

    #[test]
    fn asks_before_clearing() {
        let mut app = app_with_history(&[], &["old"]);
        app.controller.toggle_view().unwrap();
        app.confirm = Some(ConfirmAction::ClearHistory);
        app.mode = Mode::Confirm;
        let out = render_app(&mut app, TERM_W, TERM_H);
        assert!(out.contains("Clear all history?"));
        assert!(out.contains("y yes   n no"));
    }
}
