use crossterm::event::{KeyCode, KeyEvent};

use crate::controller::{RowId, ViewKind};
use crate::tui::app::{App, ConfirmAction, Mode};

/// Opacity change per `+`/`-` press, in percent
const OPACITY_STEP: i16 = 5;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    // Any key clears a stale status message
    app.status_message = None;
    app.status_is_error = false;

    match key.code {
        // Cursor
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.list_state_mut().cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            let last = app.rows().len().saturating_sub(1);
            app.list_state_mut().cursor = last;
        }

        // Views
        KeyCode::Tab | KeyCode::BackTab => {
            let result = app.controller.toggle_view();
            app.report(result);
            app.clamp_cursors();
        }
        KeyCode::Char('/') => app.mode = Mode::Search,

        // Active list
        KeyCode::Char('a') => begin_add(app),
        KeyCode::Enter | KeyCode::Char('e') => begin_edit(app),
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_complete(app),

        // Either list
        KeyCode::Char('r') => restore_selected(app),
        KeyCode::Char('d') | KeyCode::Delete => delete_selected(app),
        KeyCode::Char('C') => {
            if app.view() == ViewKind::Archive && !app.controller.archive().rows().is_empty() {
                app.confirm = Some(ConfirmAction::ClearHistory);
                app.mode = Mode::Confirm;
            }
        }

        // Widget
        KeyCode::Char('m') => app.mode = Mode::Move,
        KeyCode::Char('+') | KeyCode::Char('=') => app.settings.opacity.adjust(OPACITY_STEP),
        KeyCode::Char('-') => app.settings.opacity.adjust(-OPACITY_STEP),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.rows().len();
    if len == 0 {
        return;
    }
    let state = app.list_state_mut();
    state.cursor = state.cursor.saturating_add_signed(delta).min(len - 1);
}

/// Open the add box. Adding always happens on the Todo list.
fn begin_add(app: &mut App) {
    if app.view() == ViewKind::Archive {
        let result = app.controller.toggle_view();
        app.report(result);
        app.clamp_cursors();
    }
    app.edit_buffer.clear();
    app.edit_cursor = 0;
    app.mode = Mode::Add;
}

fn begin_edit(app: &mut App) {
    let Some(RowId::Item(id)) = app.selected_row().map(|r| r.id) else {
        return;
    };
    if !app.controller.begin_edit(id) {
        return;
    }
    let content = app
        .controller
        .active()
        .row(RowId::Item(id))
        .map(|r| r.content.clone())
        .unwrap_or_default();
    app.edit_cursor = content.len();
    app.edit_buffer = content;
    app.edit_target = Some(id);
    app.mode = Mode::Edit;
}

/// Check the selected item, or un-check it while its archive is pending.
fn toggle_complete(app: &mut App) {
    let Some((handle, completing)) = app.selected_row().map(|r| (r.handle(), r.completing)) else {
        return;
    };
    if !handle.affordances().complete {
        return;
    }
    if completing {
        if let RowId::Item(id) = handle.id {
            app.controller.uncomplete_item(id);
        }
        return;
    }
    let result = handle.complete(&mut app.controller);
    app.report(result);
    app.clamp_cursors();
}

fn restore_selected(app: &mut App) {
    let Some(handle) = app.selected_row().map(|r| r.handle()) else {
        return;
    };
    let result = handle.restore(&mut app.controller);
    if let Some(true) = app.report(result) {
        app.set_status("restored");
    }
    app.clamp_cursors();
}

fn delete_selected(app: &mut App) {
    let Some(handle) = app.selected_row().map(|r| r.handle()) else {
        return;
    };
    let result = handle.delete(&mut app.controller);
    app.report(result);
    app.clamp_cursors();
}
