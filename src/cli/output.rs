use serde::Serialize;

use crate::model::{HistoryItem, Item, format_timestamp};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub id: i64,
    pub content: String,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct HistoryJson {
    pub id: i64,
    pub content: String,
    pub completed_at: String,
}

/// Result of a write command: the id it touched or created
#[derive(Serialize)]
pub struct IdJson {
    pub id: i64,
}

#[derive(Serialize)]
pub struct ClearedJson {
    pub cleared: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn item_to_json(item: &Item) -> ItemJson {
    ItemJson {
        id: item.id.0,
        content: item.content.clone(),
        created_at: format_timestamp(&item.created_at),
    }
}

pub fn history_to_json(item: &HistoryItem) -> HistoryJson {
    HistoryJson {
        id: item.id.0,
        content: item.content.clone(),
        completed_at: format_timestamp(&item.completed_at),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

const DISPLAY_TIME: &str = "%Y-%m-%d %H:%M";

/// One active item per line: `#id  created  content`
pub fn format_item_line(item: &Item) -> String {
    format!(
        "#{}  {}  {}",
        item.id,
        item.created_at.format(DISPLAY_TIME),
        item.content
    )
}

/// One history row per line, with a check mark: `✓ #id  completed  content`
pub fn format_history_line(item: &HistoryItem) -> String {
    format!(
        "\u{2713} #{}  {}  {}",
        item.id,
        item.completed_at.format(DISPLAY_TIME),
        item.content
    )
}

/// Footer like the widget's count label
pub fn format_count(n: usize, noun: &str) -> String {
    format!("{} {}", n, noun)
}
