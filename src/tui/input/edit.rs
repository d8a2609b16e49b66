use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::{EditOutcome, RowId};
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Text input shared by the add box and the inline row editor.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => confirm_edit(app),
        // Leaving an inline edit saves it; leaving the add box drops it
        (_, KeyCode::Esc) => match app.mode {
            Mode::Edit => confirm_edit(app),
            _ => cancel_edit(app),
        },
        // Ctrl+A / Home: jump to start of line
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => app.edit_cursor = 0,
        (_, KeyCode::Home) => app.edit_cursor = 0,
        // Ctrl+E / End: jump to end of line
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_cursor = app.edit_buffer.len();
        }
        (_, KeyCode::End) => app.edit_cursor = app.edit_buffer.len(),
        // Kill to start of line
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.drain(..app.edit_cursor);
            app.edit_cursor = 0;
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_cursor = next;
            }
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_buffer.drain(prev..app.edit_cursor);
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_buffer.drain(app.edit_cursor..next);
            }
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            let mut buf = [0u8; 4];
            insert_text(app, c.encode_utf8(&mut buf));
        }
        _ => {}
    }
}

/// Insert `text` at the cursor.
pub(super) fn insert_text(app: &mut App, text: &str) {
    app.edit_buffer.insert_str(app.edit_cursor, text);
    app.edit_cursor += text.len();
}

fn confirm_edit(app: &mut App) {
    let text = std::mem::take(&mut app.edit_buffer);
    app.edit_cursor = 0;
    let mode = app.mode;
    app.mode = Mode::Navigate;

    match mode {
        Mode::Add => {
            let result = app.controller.add_item(&text);
            if let Some(Some(id)) = app.report(result) {
                app.select_row(RowId::Item(id));
            }
        }
        Mode::Edit => {
            let Some(id) = app.edit_target.take() else {
                return;
            };
            let handle = app.controller.active().row(RowId::Item(id)).map(|r| r.handle());
            let result = match handle {
                Some(handle) => handle.commit_edit(&text, &mut app.controller),
                None => Ok(EditOutcome::Discarded),
            };
            if let Some(EditOutcome::Discarded) = app.report(result) {
                // The row still shows its old text; make sure it left edit
                app.controller.cancel_edit();
            }
        }
        _ => {}
    }
    app.clamp_cursors();
}

fn cancel_edit(app: &mut App) {
    app.edit_buffer.clear();
    app.edit_cursor = 0;
    if app.edit_target.take().is_some() {
        app.controller.cancel_edit();
    }
    app.mode = Mode::Navigate;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::app_with_items;

    fn press(app: &mut App, code: KeyCode) {
        handle_edit(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        handle_edit(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn start_add(app: &mut App) {
        app.mode = Mode::Add;
        app.edit_buffer.clear();
        app.edit_cursor = 0;
    }

    fn start_edit(app: &mut App) {
        let Some(RowId::Item(id)) = app.selected_row().map(|r| r.id) else {
            panic!("no active row selected");
        };
        assert!(app.controller.begin_edit(id));
        app.edit_buffer = app.selected_row().unwrap().content.clone();
        app.edit_cursor = app.edit_buffer.len();
        app.edit_target = Some(id);
        app.mode = Mode::Edit;
    }

    fn stored(app: &App) -> Vec<String> {
        use crate::store::Gateway;
        app.controller
            .gateway()
            .list_items()
            .unwrap()
            .into_iter()
            .map(|i| i.content)
            .collect()
    }

    #[test]
    fn typing_then_enter_adds_item() {
        let mut app = app_with_items(&["older"]);
        start_add(&mut app);
        type_str(&mut app, "buy milk");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(stored(&app), vec!["buy milk", "older"]);
        assert_eq!(app.selected_row().unwrap().content, "buy milk");
        assert!(app.edit_buffer.is_empty());
    }

    #[test]
    fn esc_in_add_box_discards() {
        let mut app = app_with_items(&[]);
        start_add(&mut app);
        type_str(&mut app, "never mind");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(stored(&app).is_empty());
    }

    #[test]
    fn blank_add_is_ignored() {
        let mut app = app_with_items(&[]);
        start_add(&mut app);
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(stored(&app).is_empty());
        assert!(!app.status_is_error);
    }

    #[test]
    fn cursor_keys_edit_mid_line() {
        let mut app = app_with_items(&[]);
        start_add(&mut app);
        type_str(&mut app, "bymilk");
        ctrl(&mut app, 'a');
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('u'));
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.edit_buffer, "buymil");
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.edit_buffer, "uymil");
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        ctrl(&mut app, 'u');
        assert_eq!(app.edit_buffer, "mil");
        assert_eq!(app.edit_cursor, 0);
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut app = app_with_items(&[]);
        start_add(&mut app);
        insert_text(&mut app, "cafe\u{0301}");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.edit_buffer, "caf");
    }

    #[test]
    fn enter_saves_inline_edit() {
        let mut app = app_with_items(&["draft"]);
        start_edit(&mut app);
        type_str(&mut app, " v2");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(stored(&app), vec!["draft v2"]);
        assert_eq!(app.selected_row().unwrap().content, "draft v2");
        assert!(app.controller.active().editing_row().is_none());
    }

    #[test]
    fn esc_also_saves_inline_edit() {
        let mut app = app_with_items(&["draft"]);
        start_edit(&mut app);
        type_str(&mut app, "!");
        press(&mut app, KeyCode::Esc);
        assert_eq!(stored(&app), vec!["draft!"]);
    }

    #[test]
    fn emptied_inline_edit_keeps_old_text() {
        let mut app = app_with_items(&["keep me"]);
        start_edit(&mut app);
        ctrl(&mut app, 'u');
        press(&mut app, KeyCode::Enter);
        assert_eq!(stored(&app), vec!["keep me"]);
        assert_eq!(app.selected_row().unwrap().content, "keep me");
        assert!(app.controller.active().editing_row().is_none());
    }
}
