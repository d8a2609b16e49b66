use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::controller::Controller;
use crate::model::Settings;
use crate::store::{Clock, Gateway, SqliteGateway};
use crate::tui::app::App;

pub const TERM_W: u16 = 40;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    buffer_to_string(&render_to_buffer(w, h, f))
}

pub fn render_to_buffer<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Plain text of a buffer, one line per row, trailing blanks trimmed
pub fn buffer_to_string(buf: &Buffer) -> String {
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Cell where `text` starts, scanning rows top to bottom
pub fn find_text(buf: &Buffer, text: &str) -> Option<(u16, u16)> {
    let symbols: Vec<String> = text.chars().map(String::from).collect();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            let fits = x as usize + symbols.len() <= buf.area.width as usize;
            if fits
                && symbols
                    .iter()
                    .enumerate()
                    .all(|(i, s)| buf[(x + i as u16, y)].symbol() == s)
            {
                return Some((x, y));
            }
        }
    }
    None
}

/// Draw the whole app and return the text
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    buffer_to_string(&render_app_buffer(app, w, h))
}

pub fn render_app_buffer(app: &mut App, w: u16, h: u16) -> Buffer {
    render_to_buffer(w, h, |frame, _| super::render(frame, app))
}

/// A clock that advances one second per call, so rows sort predictably
fn ticking_clock() -> Clock {
    let tick = Rc::new(Cell::new(0i64));
    Box::new(move || {
        let n = tick.get();
        tick.set(n + 1);
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            + chrono::Duration::seconds(n)
    })
}

/// In-memory store holding `history` (archived in order) then `items`
fn seeded_gateway(items: &[&str], history: &[&str]) -> SqliteGateway {
    let mut gw = SqliteGateway::open_in_memory()
        .unwrap()
        .with_clock(ticking_clock());
    for content in history {
        let id = gw.create_item(content).unwrap();
        gw.archive_item(id, content).unwrap();
    }
    for content in items {
        gw.create_item(content).unwrap();
    }
    gw
}

/// App over a seeded store. Completions archive immediately.
pub fn app_with_history(items: &[&str], history: &[&str]) -> App {
    let controller =
        Controller::with_completion_delay(seeded_gateway(items, history), Duration::ZERO).unwrap();
    App::new(controller, Settings::default())
}

pub fn app_with_items(items: &[&str]) -> App {
    app_with_history(items, &[])
}

/// Like [`app_with_items`] but with the real completion delay.
pub fn app_with_delay(items: &[&str]) -> App {
    let controller = Controller::new(seeded_gateway(items, &[])).unwrap();
    App::new(controller, Settings::default())
}
