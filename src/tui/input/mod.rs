mod confirm;
mod edit;
mod move_mode;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use confirm::handle_confirm;
use edit::{handle_edit, insert_text};
use move_mode::handle_move;
use navigate::handle_navigate;
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Add | Mode::Edit => handle_edit(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Confirm => handle_confirm(app, key),
        Mode::Move => handle_move(app, key),
    }
}

/// Handle a bracketed paste event. Only the text inputs take pastes;
/// newlines become spaces since content is a single line.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    let clean = text.replace(['\r', '\n'], " ");
    match app.mode {
        Mode::Add | Mode::Edit => insert_text(app, &clean),
        Mode::Search => search::append_search(app, &clean),
        _ => {}
    }
}

/// Shifted letters arrive as uppercase chars; drop the redundant SHIFT so
/// bindings can match on the char alone.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if matches!(key.code, KeyCode::Char(_)) {
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}
