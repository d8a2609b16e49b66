use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, ConfirmAction, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let confirmed = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
        _ => return,
    };

    let action = app.confirm.take();
    app.mode = Mode::Navigate;
    match action {
        Some(ConfirmAction::ClearHistory) => {
            let result = app.controller.clear_all_history(confirmed);
            if app.report(result).is_some() && confirmed {
                app.set_status("history cleared");
            }
        }
        None => {}
    }
    app.clamp_cursors();
}
