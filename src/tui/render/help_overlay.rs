use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::controller::ViewKind;
use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(46, 26, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
    add_binding(&mut lines, " Tab", "Toggle Todo/History", key_style, desc_style);
    add_binding(&mut lines, " /", "Search (live)", key_style, desc_style);

    // Context-sensitive help
    match app.view() {
        ViewKind::Active => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(" Todo", header_style)));
            add_binding(&mut lines, " a", "Add todo", key_style, desc_style);
            add_binding(&mut lines, " Enter/e", "Edit inline", key_style, desc_style);
            add_binding(&mut lines, " Space/x", "Check / uncheck", key_style, desc_style);
            add_binding(&mut lines, " d", "Delete", key_style, desc_style);
        }
        ViewKind::Archive => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(" History", header_style)));
            add_binding(&mut lines, " r", "Restore to Todo", key_style, desc_style);
            add_binding(&mut lines, " d", "Delete", key_style, desc_style);
            add_binding(&mut lines, " C", "Clear all history", key_style, desc_style);
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Widget", header_style)));
    add_binding(&mut lines, " m", "Move (arrows, Enter)", key_style, desc_style);
    add_binding(&mut lines, " +/-", "Opacity", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q/Esc", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 12;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// A rectangle of at most `width` x `height` centered in `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}
