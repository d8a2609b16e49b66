use rusqlite::Connection;

use super::error::Result;

/// Schema version stamped into `PRAGMA user_version`
pub const SCHEMA_VERSION: i32 = 1;

/// Create the two tables if missing. Databases written by earlier versions
/// of the widget carry the same tables at user_version 0 and open as-is.
pub fn init_schema(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            completed_at TEXT DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )?;

    if current_version < SCHEMA_VERSION {
        tracing::info!(from = current_version, to = SCHEMA_VERSION, "stamping schema version");
        conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;
    }

    Ok(())
}
