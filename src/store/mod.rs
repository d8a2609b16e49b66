//! Persistence gateway over the local SQLite file.
//!
//! Two tables: `todos` holds active items, `history` holds archived ones.
//! Every write runs in its own transaction and is durable before returning.

mod error;
mod schema;
mod sqlite;

pub use error::{Result, StoreError};
pub use schema::{SCHEMA_VERSION, init_schema};
pub use sqlite::{Clock, SqliteGateway};

use crate::model::{HistoryId, HistoryItem, Item, ItemId};

/// Operations the controller and CLI need from the store.
///
/// Unknown ids on update/delete are silently ignored. Empty content is
/// rejected with [`StoreError::Validation`] before any SQL runs.
pub trait Gateway {
    fn create_item(&mut self, content: &str) -> Result<ItemId>;
    /// Newest first; equal timestamps keep insertion order
    fn list_items(&self) -> Result<Vec<Item>>;
    fn find_item(&self, id: ItemId) -> Result<Option<Item>>;
    fn update_item_content(&mut self, id: ItemId, content: &str) -> Result<()>;
    fn delete_item(&mut self, id: ItemId) -> Result<()>;
    /// Substring match; an empty keyword lists everything
    fn search_items(&self, keyword: &str) -> Result<Vec<Item>>;

    /// Move an item to history in one transaction.
    /// Returns `None` without writing if the item is already gone.
    fn archive_item(&mut self, id: ItemId, content: &str) -> Result<Option<HistoryId>>;
    /// Move a history row back as a fresh item in one transaction.
    /// Returns `None` without writing if the history row is already gone.
    fn restore_item(&mut self, id: HistoryId, content: &str) -> Result<Option<ItemId>>;

    fn list_history(&self) -> Result<Vec<HistoryItem>>;
    fn find_history(&self, id: HistoryId) -> Result<Option<HistoryItem>>;
    fn delete_history(&mut self, id: HistoryId) -> Result<()>;
    fn search_history(&self, keyword: &str) -> Result<Vec<HistoryItem>>;
    fn clear_history(&mut self) -> Result<()>;
}
