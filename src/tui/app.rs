use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::controller::{Controller, Row, RowId, ViewKind};
use crate::io::logging::init_file_logging;
use crate::io::paths::DataPaths;
use crate::io::settings_io::{load_settings, write_settings};
use crate::model::{ItemId, Settings};
use crate::store::{SqliteGateway, StoreError};

use super::input;
use super::render;
use super::theme::Theme;
use super::widget;

/// How long the event loop waits for input before ticking
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new to-do into the add box
    Add,
    /// Inline editing of one active row
    Edit,
    Search,
    Confirm,
    /// Moving the widget with the arrow keys
    Move,
}

/// Action waiting on a y/n answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ClearHistory,
}

/// Cursor and scroll for one list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListState {
    pub cursor: usize,
    pub scroll_offset: usize,
}

/// Main application state
pub struct App {
    pub controller: Controller<SqliteGateway>,
    pub settings: Settings,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    pub active_list: ListState,
    pub archive_list: ListState,
    /// Text being typed in Add or Edit mode
    pub edit_buffer: String,
    /// Byte offset of the cursor in `edit_buffer`
    pub edit_cursor: usize,
    /// Item under inline edit
    pub edit_target: Option<ItemId>,
    pub confirm: Option<ConfirmAction>,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub status_is_error: bool,
    /// Terminal area seen by the last draw
    pub screen: Rect,
}

impl App {
    pub fn new(controller: Controller<SqliteGateway>, settings: Settings) -> Self {
        let theme = Theme::from_config(&settings.ui);
        App {
            controller,
            settings,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            active_list: ListState::default(),
            archive_list: ListState::default(),
            edit_buffer: String::new(),
            edit_cursor: 0,
            edit_target: None,
            confirm: None,
            show_help: false,
            status_message: None,
            status_is_error: false,
            screen: Rect::new(0, 0, widget::WIDGET_WIDTH, widget::WIDGET_HEIGHT),
        }
    }

    pub fn view(&self) -> ViewKind {
        self.controller.view()
    }

    pub fn list_state(&self) -> &ListState {
        match self.view() {
            ViewKind::Active => &self.active_list,
            ViewKind::Archive => &self.archive_list,
        }
    }

    pub fn list_state_mut(&mut self) -> &mut ListState {
        match self.view() {
            ViewKind::Active => &mut self.active_list,
            ViewKind::Archive => &mut self.archive_list,
        }
    }

    pub fn rows(&self) -> &[Row] {
        self.controller.current_panel().rows()
    }

    /// Row under the cursor in the current view
    pub fn selected_row(&self) -> Option<&Row> {
        self.rows().get(self.list_state().cursor)
    }

    /// Keep both cursors on a row after the lists changed
    pub fn clamp_cursors(&mut self) {
        let active_len = self.controller.active().rows().len();
        let archive_len = self.controller.archive().rows().len();
        self.active_list.cursor = self.active_list.cursor.min(active_len.saturating_sub(1));
        self.archive_list.cursor = self
            .archive_list
            .cursor
            .min(archive_len.saturating_sub(1));
    }

    /// Move the cursor to the row with `id`, if it is shown.
    pub fn select_row(&mut self, id: RowId) {
        if let Some(idx) = self.rows().iter().position(|r| r.id == id) {
            self.list_state_mut().cursor = idx;
        }
    }

    /// Where the widget is drawn on the current screen
    pub fn widget_area(&self) -> Rect {
        widget::placement(&self.settings.position, self.screen)
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = false;
    }

    /// Surface a store result. Errors are logged and shown in the status
    /// row; the widget keeps running.
    pub fn report<T>(&mut self, result: Result<T, StoreError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(error = %e, "store operation failed");
                self.status_message = Some(e.to_string());
                self.status_is_error = true;
                None
            }
        }
    }

    /// Fire due completions and keep UI state consistent with the lists.
    pub fn tick(&mut self, now: Instant) {
        // The controller refreshes both lists whenever something fell due,
        // even if the store had nothing left to archive.
        let due = self
            .controller
            .completions()
            .next_deadline()
            .is_some_and(|deadline| deadline <= now);
        if !due {
            return;
        }
        let result = self.controller.tick(now);
        self.report(result);
        self.after_lists_changed();
    }

    /// A refresh rebuilds the rows, so re-mark the row under inline edit.
    pub fn after_lists_changed(&mut self) {
        if self.mode == Mode::Edit
            && let Some(id) = self.edit_target
            && !self.controller.begin_edit(id)
        {
            self.edit_target = None;
            self.edit_buffer.clear();
            self.edit_cursor = 0;
            self.mode = Mode::Navigate;
        }
        self.clamp_cursors();
    }
}

/// Run the TUI application
pub fn run(paths: &DataPaths) -> Result<(), Box<dyn std::error::Error>> {
    init_file_logging(&paths.log)?;
    tracing::info!(db = %paths.db.display(), "starting widget");

    let settings = load_settings(&paths.settings);
    let gateway = SqliteGateway::open(&paths.db)?;
    let controller = Controller::new(gateway)?;
    let mut app = App::new(controller, settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    if let Err(e) = write_settings(&paths.settings, &app.settings) {
        tracing::warn!(error = %e, "could not save settings");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    tracing::info!("widget closed");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
