use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::tui::widget;

/// Cells per arrow press with Shift held
const FAST_STEP: i32 = 4;

/// Move the widget around the terminal. The position is saved as it moves
/// and snapped to a nearby edge when the move ends.
pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        FAST_STEP
    } else {
        1
    };
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => nudge(app, -step, 0),
        KeyCode::Right | KeyCode::Char('l') => nudge(app, step, 0),
        KeyCode::Up | KeyCode::Char('k') => nudge(app, 0, -step),
        KeyCode::Down | KeyCode::Char('j') => nudge(app, 0, step),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('m') => finish_move(app),
        _ => {}
    }
}

fn nudge(app: &mut App, dx: i32, dy: i32) {
    let rect = widget::nudge(app.widget_area(), dx, dy, app.screen);
    app.settings.position = widget::position_of(rect);
}

fn finish_move(app: &mut App) {
    let rect = widget::snap_to_edge(app.widget_area(), app.screen);
    app.settings.position = widget::position_of(rect);
    tracing::debug!(x = rect.x, y = rect.y, "widget moved");
    app.mode = Mode::Navigate;
}
