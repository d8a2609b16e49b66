use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::ViewKind;
use crate::tui::app::{App, Mode};

/// Live filter over the current list. Every keystroke re-queries.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Keep the filter and go back to the list
        (_, KeyCode::Enter) => app.mode = Mode::Navigate,
        // Drop the filter
        (_, KeyCode::Esc) => {
            set_search(app, String::new());
            app.mode = Mode::Navigate;
        }
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            set_search(app, String::new());
        }
        (_, KeyCode::Backspace) => {
            let mut text = current_search(app);
            text.pop();
            set_search(app, text);
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            let mut text = current_search(app);
            text.push(c);
            set_search(app, text);
        }
        _ => {}
    }
}

/// Append pasted text to the search field.
pub(super) fn append_search(app: &mut App, text: &str) {
    let mut current = current_search(app);
    current.push_str(text);
    set_search(app, current);
}

fn current_search(app: &App) -> String {
    app.controller.current_panel().search_text().to_string()
}

fn set_search(app: &mut App, text: String) {
    let result = match app.view() {
        ViewKind::Active => app.controller.on_search_active_changed(&text),
        ViewKind::Archive => app.controller.on_search_archive_changed(&text),
    };
    app.report(result);
    app.list_state_mut().cursor = 0;
    app.list_state_mut().scroll_offset = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::app_with_history;

    fn press(app: &mut App, code: KeyCode) {
        handle_search(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn shown(app: &App) -> Vec<String> {
        app.rows().iter().map(|r| r.content.clone()).collect()
    }

    #[test]
    fn filters_on_every_keystroke() {
        let mut app = app_with_history(&["buy milk", "walk dog", "buy bread"], &[]);
        app.mode = Mode::Search;
        type_str(&mut app, "bu");
        assert_eq!(shown(&app), vec!["buy bread", "buy milk"]);
        type_str(&mut app, "y m");
        assert_eq!(shown(&app), vec!["buy milk"]);
        assert_eq!(app.controller.active().count_label(), "1 Todos");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.active().search_text(), "buy");
        assert_eq!(shown(&app).len(), 2);
    }

    #[test]
    fn enter_keeps_filter_esc_clears_it() {
        let mut app = app_with_history(&["buy milk", "walk dog"], &[]);
        app.mode = Mode::Search;
        type_str(&mut app, "dog");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(shown(&app), vec!["walk dog"]);

        app.mode = Mode::Search;
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.controller.active().search_text(), "");
        assert_eq!(shown(&app).len(), 2);
    }

    #[test]
    fn searches_history_in_history_view() {
        let mut app = app_with_history(&["milk today"], &["milk yesterday", "eggs"]);
        app.controller.toggle_view().unwrap();
        app.mode = Mode::Search;
        type_str(&mut app, "milk");
        assert_eq!(shown(&app), vec!["milk yesterday"]);
        assert_eq!(app.controller.archive().count_label(), "1 Histories");
        // active list untouched
        assert_eq!(app.controller.active().search_text(), "");
    }

    #[test]
    fn filtering_resets_cursor() {
        let mut app = app_with_history(&["a1", "a2", "b1"], &[]);
        app.active_list.cursor = 2;
        app.mode = Mode::Search;
        type_str(&mut app, "a");
        assert_eq!(app.active_list.cursor, 0);
    }
}
