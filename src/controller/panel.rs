use chrono::NaiveDateTime;

use crate::model::{HistoryId, HistoryItem, Item, ItemId};

use super::row::RowHandle;

/// Which list a row or panel belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Active,
    Archive,
}

/// Id of a rendered row, tagged with the table it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowId {
    Item(ItemId),
    History(HistoryId),
}

impl RowId {
    pub fn kind(self) -> RowKind {
        match self {
            RowId::Item(_) => RowKind::Active,
            RowId::History(_) => RowKind::Archive,
        }
    }
}

/// One rendered entry in a list panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub content: String,
    /// created_at for active rows, completed_at for archive rows
    pub timestamp: NaiveDateTime,
    /// Checked and waiting for the archive delay (drawn struck through)
    pub completing: bool,
    /// Showing the inline editor instead of the label
    pub editing: bool,
}

impl Row {
    pub fn kind(&self) -> RowKind {
        self.id.kind()
    }

    pub fn handle(&self) -> RowHandle {
        RowHandle {
            id: self.id,
            content: self.content.clone(),
        }
    }
}

impl From<Item> for Row {
    fn from(item: Item) -> Self {
        Row {
            id: RowId::Item(item.id),
            content: item.content,
            timestamp: item.created_at,
            completing: false,
            editing: false,
        }
    }
}

impl From<HistoryItem> for Row {
    fn from(item: HistoryItem) -> Self {
        Row {
            id: RowId::History(item.id),
            content: item.content,
            timestamp: item.completed_at,
            completing: false,
            editing: false,
        }
    }
}

/// Rendered state of one of the two lists
#[derive(Debug, Clone)]
pub struct Panel {
    kind: RowKind,
    rows: Vec<Row>,
    search_text: String,
}

impl Panel {
    pub fn new(kind: RowKind) -> Self {
        Panel {
            kind,
            rows: Vec::new(),
            search_text: String::new(),
        }
    }

    pub fn kind(&self) -> RowKind {
        self.kind
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// "3 Todos" / "3 Histories", counting what is currently shown
    pub fn count_label(&self) -> String {
        let noun = match self.kind {
            RowKind::Active => "Todos",
            RowKind::Archive => "Histories",
        };
        format!("{} {}", self.rows.len(), noun)
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn editing_row(&self) -> Option<&Row> {
        self.rows.iter().find(|r| r.editing)
    }

    pub(super) fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    pub(super) fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    pub(super) fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
    }

    pub(super) fn clear_editing(&mut self) {
        for row in &mut self.rows {
            row.editing = false;
        }
    }
}
