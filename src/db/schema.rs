// Database schema: table creation and version lookup.
//
// A `schema_version` table records which schema the file was created with.
// `db::open` compares it against SCHEMA_VERSION before loading reviews.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Bump when the `reviews` table layout changes.
pub const SCHEMA_VERSION: i64 = 1;

/// Create all tables if they don't exist yet.
///
/// Idempotent, so it is safe to call on every import.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- One row per observed rating. Repeated (user, restaurant) pairs are
        -- kept; the rating matrix averages them.
        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            restaurant TEXT NOT NULL,
            rating REAL NOT NULL,
            imported_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- History lookups filter by user, stats group by restaurant
        CREATE INDEX IF NOT EXISTS idx_reviews_user
            ON reviews(user_id);

        CREATE INDEX IF NOT EXISTS idx_reviews_restaurant
            ON reviews(restaurant);
        ",
    )
    .context("Failed to create database tables")?;

    // Stamp the version once; later imports leave the row alone
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Highest schema version recorded in the file.
///
/// `None` when there is no `schema_version` table (or it is empty), which
/// means an import never created this file.
pub fn current_version(conn: &Connection) -> Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
            [],
            |row| row.get(0),
        )
        .context("Failed to read database catalog")?;
    if !has_table {
        return Ok(None);
    }

    // MAX over an empty table yields a single NULL row
    let version = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .context("Failed to read schema version")?;
    Ok(version)
}

/// Count the number of user-created tables in the database.
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
