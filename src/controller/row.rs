use crate::model::{HistoryId, ItemId};
use crate::store::Result;

use super::panel::{RowId, RowKind};

/// Result of committing an inline edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Saved,
    /// Empty or unchanged text; the row shows its old content again
    Discarded,
}

/// What a list row can ask its owner to do.
///
/// Rows receive this at the point of interaction instead of holding a
/// reference back to the window that owns them.
pub trait RowActions {
    /// Complete an active item (moves it to history after the delay)
    fn archive(&mut self, id: ItemId, content: &str) -> Result<()>;
    /// Bring a history row back as a new active item
    fn restore(&mut self, id: HistoryId, content: &str) -> Result<()>;
    fn delete(&mut self, id: RowId) -> Result<()>;
    /// Commit inline edited text for an active item
    fn update(&mut self, id: ItemId, new_text: &str) -> Result<EditOutcome>;
}

/// Which interactions a row offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub complete: bool,
    pub edit: bool,
    pub restore: bool,
    pub delete: bool,
}

/// Detached snapshot of a row, used to route one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHandle {
    pub id: RowId,
    pub content: String,
}

impl RowHandle {
    pub fn kind(&self) -> RowKind {
        self.id.kind()
    }

    pub fn affordances(&self) -> Affordances {
        match self.kind() {
            RowKind::Active => Affordances {
                complete: true,
                edit: true,
                restore: false,
                delete: true,
            },
            RowKind::Archive => Affordances {
                complete: false,
                edit: false,
                restore: true,
                delete: true,
            },
        }
    }

    /// Returns false if this row cannot be completed.
    pub fn complete(&self, actions: &mut dyn RowActions) -> Result<bool> {
        match self.id {
            RowId::Item(id) => {
                actions.archive(id, &self.content)?;
                Ok(true)
            }
            RowId::History(_) => Ok(false),
        }
    }

    /// Returns false if this row cannot be restored.
    pub fn restore(&self, actions: &mut dyn RowActions) -> Result<bool> {
        match self.id {
            RowId::History(id) => {
                actions.restore(id, &self.content)?;
                Ok(true)
            }
            RowId::Item(_) => Ok(false),
        }
    }

    pub fn delete(&self, actions: &mut dyn RowActions) -> Result<()> {
        actions.delete(self.id)
    }

    /// Archived content is immutable, so edits on archive rows are discarded.
    pub fn commit_edit(&self, new_text: &str, actions: &mut dyn RowActions) -> Result<EditOutcome> {
        match self.id {
            RowId::Item(id) => actions.update(id, new_text),
            RowId::History(_) => Ok(EditOutcome::Discarded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl RowActions for Recorder {
        fn archive(&mut self, id: ItemId, content: &str) -> Result<()> {
            self.calls.push(format!("archive {} {}", id, content));
            Ok(())
        }
        fn restore(&mut self, id: HistoryId, content: &str) -> Result<()> {
            self.calls.push(format!("restore {} {}", id, content));
            Ok(())
        }
        fn delete(&mut self, id: RowId) -> Result<()> {
            self.calls.push(format!("delete {:?}", id));
            Ok(())
        }
        fn update(&mut self, id: ItemId, new_text: &str) -> Result<EditOutcome> {
            self.calls.push(format!("update {} {}", id, new_text));
            Ok(EditOutcome::Saved)
        }
    }

    fn active(content: &str) -> RowHandle {
        RowHandle {
            id: RowId::Item(ItemId(1)),
            content: content.into(),
        }
    }

    fn archived(content: &str) -> RowHandle {
        RowHandle {
            id: RowId::History(HistoryId(2)),
            content: content.into(),
        }
    }

    #[test]
    fn active_rows_complete_and_edit() {
        let mut rec = Recorder::default();
        let row = active("buy milk");
        assert!(row.complete(&mut rec).unwrap());
        assert!(!row.restore(&mut rec).unwrap());
        assert_eq!(row.commit_edit("buy oat milk", &mut rec).unwrap(), EditOutcome::Saved);
        assert_eq!(
            rec.calls,
            vec!["archive 1 buy milk", "update 1 buy oat milk"]
        );
    }

    #[test]
    fn archive_rows_restore_but_never_edit() {
        let mut rec = Recorder::default();
        let row = archived("walk dog");
        assert!(!row.complete(&mut rec).unwrap());
        assert!(row.restore(&mut rec).unwrap());
        assert_eq!(
            row.commit_edit("changed", &mut rec).unwrap(),
            EditOutcome::Discarded
        );
        assert_eq!(rec.calls, vec!["restore 2 walk dog"]);
    }

    #[test]
    fn both_kinds_delete() {
        let mut rec = Recorder::default();
        active("a").delete(&mut rec).unwrap();
        archived("b").delete(&mut rec).unwrap();
        assert_eq!(rec.calls.len(), 2);
    }

    #[test]
    fn affordances_by_kind() {
        let a = active("x").affordances();
        assert!(a.complete && a.edit && a.delete && !a.restore);
        let h = archived("x").affordances();
        assert!(h.restore && h.delete && !h.edit && !h.complete);
    }
}
