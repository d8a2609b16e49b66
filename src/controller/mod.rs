//! List/view controller: turns user actions into gateway calls and keeps
//! the two rendered lists in sync with the store.

mod completion;
mod panel;
mod row;

pub use completion::{COMPLETION_DELAY, CompletionQueue, PendingCompletion};
pub use panel::{Panel, Row, RowId, RowKind};
pub use row::{Affordances, EditOutcome, RowActions, RowHandle};

use std::time::{Duration, Instant};

use crate::model::{HistoryId, ItemId, normalize_content};
use crate::store::{Gateway, Result};

/// Which list the widget is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Active,
    Archive,
}

pub struct Controller<G: Gateway> {
    gateway: G,
    view: ViewKind,
    active: Panel,
    archive: Panel,
    completions: CompletionQueue,
}

impl<G: Gateway> Controller<G> {
    /// Build a controller and load both lists.
    pub fn new(gateway: G) -> Result<Self> {
        Self::with_completion_delay(gateway, COMPLETION_DELAY)
    }

    pub fn with_completion_delay(gateway: G, delay: Duration) -> Result<Self> {
        let mut controller = Controller {
            gateway,
            view: ViewKind::Active,
            active: Panel::new(RowKind::Active),
            archive: Panel::new(RowKind::Archive),
            completions: CompletionQueue::new(delay),
        };
        controller.refresh_active()?;
        controller.refresh_archive()?;
        Ok(controller)
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn active(&self) -> &Panel {
        &self.active
    }

    pub fn archive(&self) -> &Panel {
        &self.archive
    }

    /// The panel for the current view
    pub fn current_panel(&self) -> &Panel {
        match self.view {
            ViewKind::Active => &self.active,
            ViewKind::Archive => &self.archive,
        }
    }

    pub fn completions(&self) -> &CompletionQueue {
        &self.completions
    }

    // -----------------------------------------------------------------------
    // Refresh & view
    // -----------------------------------------------------------------------

    /// Reload the active list, clearing its search text.
    pub fn refresh_active(&mut self) -> Result<()> {
        self.active.set_search_text("");
        self.load_active("")
    }

    /// Reload the archive list, clearing its search text.
    pub fn refresh_archive(&mut self) -> Result<()> {
        self.archive.set_search_text("");
        self.load_archive("")
    }

    pub fn toggle_view(&mut self) -> Result<()> {
        self.view = match self.view {
            ViewKind::Active => ViewKind::Archive,
            ViewKind::Archive => ViewKind::Active,
        };
        match self.view {
            ViewKind::Active => self.refresh_active(),
            ViewKind::Archive => self.refresh_archive(),
        }
    }

    /// Live filter for the active list. The label counts the filtered rows.
    pub fn on_search_active_changed(&mut self, text: &str) -> Result<()> {
        self.active.set_search_text(text);
        self.load_active(text.trim())
    }

    pub fn on_search_archive_changed(&mut self, text: &str) -> Result<()> {
        self.archive.set_search_text(text);
        self.load_archive(text.trim())
    }

    fn load_active(&mut self, keyword: &str) -> Result<()> {
        let items = self.gateway.search_items(keyword)?;
        let rows = items
            .into_iter()
            .map(|item| {
                let mut row = Row::from(item);
                if let RowId::Item(id) = row.id {
                    row.completing = self.completions.contains(id);
                }
                row
            })
            .collect();
        self.active.set_rows(rows);
        Ok(())
    }

    fn load_archive(&mut self, keyword: &str) -> Result<()> {
        let items = self.gateway.search_history(keyword)?;
        self.archive
            .set_rows(items.into_iter().map(Row::from).collect());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Active list actions
    // -----------------------------------------------------------------------

    /// Add a new to-do. Blank text is ignored without touching the store.
    /// Returns the new id, if one was created.
    pub fn add_item(&mut self, text: &str) -> Result<Option<ItemId>> {
        let Some(content) = normalize_content(text) else {
            return Ok(None);
        };
        let id = self.gateway.create_item(content)?;
        self.refresh_active()?;
        Ok(Some(id))
    }

    /// Check an item off. The row is struck through now; the archive call
    /// happens once the completion delay has passed (see [`Self::tick`]).
    pub fn complete_item(&mut self, id: ItemId, content: &str, now: Instant) -> Result<()> {
        if let Some(row) = self.active.row_mut(RowId::Item(id)) {
            row.completing = true;
            row.editing = false;
        }
        self.completions.schedule(id, content, now);
        if self.completions.delay().is_zero() {
            self.tick(now)?;
        }
        Ok(())
    }

    /// Un-check an item whose archive has not fired yet.
    pub fn uncomplete_item(&mut self, id: ItemId) -> bool {
        let cancelled = self.completions.cancel(id);
        if cancelled && let Some(row) = self.active.row_mut(RowId::Item(id)) {
            row.completing = false;
        }
        cancelled
    }

    /// Fire every completion that is due. Returns how many were archived.
    pub fn tick(&mut self, now: Instant) -> Result<usize> {
        let due = self.completions.take_due(now);
        if due.is_empty() {
            return Ok(0);
        }

        let mut first_err = None;
        let mut archived = 0;
        for pending in &due {
            match self.gateway.archive_item(pending.id, &pending.content) {
                Ok(Some(_)) => archived += 1,
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(id = %pending.id, error = %e, "archive failed");
                    first_err.get_or_insert(e);
                }
            }
        }

        self.refresh_active()?;
        self.refresh_archive()?;
        match first_err {
            Some(e) => Err(e),
            None => Ok(archived),
        }
    }

    pub fn delete_active_item(&mut self, id: ItemId) -> Result<()> {
        self.completions.cancel(id);
        self.gateway.delete_item(id)?;
        self.refresh_active()
    }

    /// Switch one active row into inline edit. Archive rows and rows
    /// waiting to be archived refuse.
    pub fn begin_edit(&mut self, id: ItemId) -> bool {
        let editable = self
            .active
            .row(RowId::Item(id))
            .is_some_and(|row| !row.completing);
        if !editable {
            return false;
        }
        self.active.clear_editing();
        if let Some(row) = self.active.row_mut(RowId::Item(id)) {
            row.editing = true;
        }
        true
    }

    /// Leave inline edit without saving.
    pub fn cancel_edit(&mut self) {
        self.active.clear_editing();
    }

    /// Commit inline edited text. Empty or unchanged text is discarded and
    /// the row shows its old content. Only the edited row changes.
    pub fn edit_item(&mut self, id: ItemId, new_text: &str) -> Result<EditOutcome> {
        let row_id = RowId::Item(id);
        if let Some(row) = self.active.row_mut(row_id) {
            row.editing = false;
        }

        let existing = self.active.row(row_id).map(|r| r.content.as_str());
        let content = match normalize_content(new_text) {
            Some(c) if Some(c) != existing => c.to_string(),
            _ => {
                tracing::debug!(%id, "edit discarded");
                return Ok(EditOutcome::Discarded);
            }
        };

        self.gateway.update_item_content(id, &content)?;
        if let Some(row) = self.active.row_mut(row_id) {
            row.content = content;
        }
        Ok(EditOutcome::Saved)
    }

    // -----------------------------------------------------------------------
    // Archive list actions
    // -----------------------------------------------------------------------

    pub fn restore_item(&mut self, id: HistoryId, content: &str) -> Result<()> {
        self.gateway.restore_item(id, content)?;
        self.refresh_active()?;
        self.refresh_archive()
    }

    pub fn delete_history_item(&mut self, id: HistoryId) -> Result<()> {
        self.gateway.delete_history(id)?;
        self.refresh_archive()
    }

    /// Empty the archive once the user has confirmed.
    pub fn clear_all_history(&mut self, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Ok(());
        }
        self.gateway.clear_history()?;
        self.refresh_archive()
    }
}

impl<G: Gateway> RowActions for Controller<G> {
    fn archive(&mut self, id: ItemId, content: &str) -> Result<()> {
        self.complete_item(id, content, Instant::now())
    }

    fn restore(&mut self, id: HistoryId, content: &str) -> Result<()> {
        self.restore_item(id, content)
    }

    fn delete(&mut self, id: RowId) -> Result<()> {
        match id {
            RowId::Item(id) => self.delete_active_item(id),
            RowId::History(id) => self.delete_history_item(id),
        }
    }

    fn update(&mut self, id: ItemId, new_text: &str) -> Result<EditOutcome> {
        self.edit_item(id, new_text)
    }
}
