use std::path::Path;

use chrono::{NaiveDateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::error::{Result, StoreError};
use super::schema::init_schema;
use super::Gateway;
use crate::model::{
    HistoryId, HistoryItem, Item, ItemId, format_timestamp, normalize_content, parse_timestamp,
};

/// Source of "now" for created_at / completed_at
pub type Clock = Box<dyn Fn() -> NaiveDateTime>;

const ITEM_COLUMNS: &str = "SELECT id, content, created_at FROM todos";
const HISTORY_COLUMNS: &str = "SELECT id, content, completed_at FROM history";

// Rows written with a `T` separator must sort by time, not by that byte.
const ITEM_ORDER: &str = "ORDER BY replace(created_at, 'T', ' ') DESC, id ASC";
const HISTORY_ORDER: &str = "ORDER BY replace(completed_at, 'T', ' ') DESC, id ASC";

pub struct SqliteGateway {
    conn: Connection,
    clock: Clock,
}

impl SqliteGateway {
    /// Open (or create) the database file and make sure both tables exist.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|e| StoreError::Unavailable {
            path: db_path.to_path_buf(),
            source: e,
        })?;
        tracing::info!(path = %db_path.display(), "opened todo database");
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(SqliteGateway {
            conn,
            clock: Box::new(|| Utc::now().naive_utc()),
        })
    }

    /// Replace the clock used to stamp new rows.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> String {
        format_timestamp(&(self.clock)())
    }

    fn query_items(&self, filter: Option<&str>) -> Result<Vec<Item>> {
        let items = match filter {
            Some(pattern) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{ITEM_COLUMNS} WHERE content LIKE ?1 ESCAPE '\\' {ITEM_ORDER}"
                ))?;
                stmt.query_map(params![pattern], item_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare(&format!("{ITEM_COLUMNS} {ITEM_ORDER}"))?;
                stmt.query_map([], item_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(items)
    }

    fn query_history(&self, filter: Option<&str>) -> Result<Vec<HistoryItem>> {
        let items = match filter {
            Some(pattern) => {
                let mut stmt = self.conn.prepare(&format!(
                    "{HISTORY_COLUMNS} WHERE content LIKE ?1 ESCAPE '\\' {HISTORY_ORDER}"
                ))?;
                stmt.query_map(params![pattern], history_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "{HISTORY_COLUMNS} {HISTORY_ORDER}"
                ))?;
                stmt.query_map([], history_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(items)
    }
}

impl Gateway for SqliteGateway {
    fn create_item(&mut self, content: &str) -> Result<ItemId> {
        let content = normalize_content(content).ok_or_else(StoreError::empty_content)?;
        let now = self.now();
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO todos (content, created_at) VALUES (?1, ?2)",
            params![content, now],
        )?;
        let id = ItemId(tx.last_insert_rowid());
        tx.commit()?;
        tracing::debug!(%id, "created item");
        Ok(id)
    }

    fn list_items(&self) -> Result<Vec<Item>> {
        self.query_items(None)
    }

    fn find_item(&self, id: ItemId) -> Result<Option<Item>> {
        let item = self
            .conn
            .query_row(
                &format!("{ITEM_COLUMNS} WHERE id = ?1"),
                params![id.0],
                item_from_row,
            )
            .optional()?;
        Ok(item)
    }

    fn update_item_content(&mut self, id: ItemId, content: &str) -> Result<()> {
        let content = normalize_content(content).ok_or_else(StoreError::empty_content)?;
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE todos SET content = ?1 WHERE id = ?2",
            params![content, id.0],
        )?;
        tx.commit()?;
        tracing::debug!(%id, changed, "updated item content");
        Ok(())
    }

    fn delete_item(&mut self, id: ItemId) -> Result<()> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute("DELETE FROM todos WHERE id = ?1", params![id.0])?;
        tx.commit()?;
        tracing::debug!(%id, changed, "deleted item");
        Ok(())
    }

    fn search_items(&self, keyword: &str) -> Result<Vec<Item>> {
        if keyword.is_empty() {
            return self.list_items();
        }
        self.query_items(Some(&like_pattern(keyword)))
    }

    fn archive_item(&mut self, id: ItemId, content: &str) -> Result<Option<HistoryId>> {
        // Copied verbatim; only blank content is refused
        if normalize_content(content).is_none() {
            return Err(StoreError::empty_content());
        }
        let now = self.now();
        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM todos WHERE id = ?1", params![id.0])?;
        if removed == 0 {
            tracing::debug!(%id, "archive skipped: item no longer exists");
            return Ok(None);
        }
        tx.execute(
            "INSERT INTO history (content, completed_at) VALUES (?1, ?2)",
            params![content, now],
        )?;
        let history_id = HistoryId(tx.last_insert_rowid());
        tx.commit()?;
        tracing::debug!(item = %id, history = %history_id, "archived item");
        Ok(Some(history_id))
    }

    fn restore_item(&mut self, id: HistoryId, content: &str) -> Result<Option<ItemId>> {
        // Copied verbatim; only blank content is refused
        if normalize_content(content).is_none() {
            return Err(StoreError::empty_content());
        }
        let now = self.now();
        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM history WHERE id = ?1", params![id.0])?;
        if removed == 0 {
            tracing::debug!(%id, "restore skipped: history row no longer exists");
            return Ok(None);
        }
        tx.execute(
            "INSERT INTO todos (content, created_at) VALUES (?1, ?2)",
            params![content, now],
        )?;
        let item_id = ItemId(tx.last_insert_rowid());
        tx.commit()?;
        tracing::debug!(history = %id, item = %item_id, "restored item");
        Ok(Some(item_id))
    }

    fn list_history(&self) -> Result<Vec<HistoryItem>> {
        self.query_history(None)
    }

    fn find_history(&self, id: HistoryId) -> Result<Option<HistoryItem>> {
        let item = self
            .conn
            .query_row(
                &format!("{HISTORY_COLUMNS} WHERE id = ?1"),
                params![id.0],
                history_from_row,
            )
            .optional()?;
        Ok(item)
    }

    fn delete_history(&mut self, id: HistoryId) -> Result<()> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute("DELETE FROM history WHERE id = ?1", params![id.0])?;
        tx.commit()?;
        tracing::debug!(%id, changed, "deleted history row");
        Ok(())
    }

    fn search_history(&self, keyword: &str) -> Result<Vec<HistoryItem>> {
        if keyword.is_empty() {
            return self.list_history();
        }
        self.query_history(Some(&like_pattern(keyword)))
    }

    fn clear_history(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute("DELETE FROM history", [])?;
        tx.commit()?;
        tracing::debug!(changed, "cleared history");
        Ok(())
    }
}

/// `%keyword%` with LIKE metacharacters escaped so they match literally
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Parse a timestamp column. NULL or unreadable values (possible in files
/// written by other tools) fall back to the earliest time instead of
/// failing the whole listing.
fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: Option<String> = row.get(idx)?;
    match raw.as_deref().and_then(parse_timestamp) {
        Some(ts) => Ok(ts),
        None => {
            let id: i64 = row.get(0)?;
            tracing::warn!(id, raw = ?raw, "unreadable timestamp, treating as oldest");
            Ok(NaiveDateTime::MIN)
        }
    }
}

fn item_from_row(row: &Row) -> rusqlite::Result<Item> {
    Ok(Item {
        id: ItemId(row.get(0)?),
        content: row.get(1)?,
        created_at: timestamp_column(row, 2)?,
    })
}

fn history_from_row(row: &Row) -> rusqlite::Result<HistoryItem> {
    Ok(HistoryItem {
        id: HistoryId(row.get(0)?),
        content: row.get(1)?,
        completed_at: timestamp_column(row, 2)?,
    })
}
