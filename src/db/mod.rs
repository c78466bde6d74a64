// Database layer: SQLite storage for imported reviews.
//
// `savor import` is the only writer. It creates the file and the schema.
// Every other command opens that file as a review source and refuses
// anything an import did not produce. The file lives wherever
// SAVOR_DB_PATH points (defaults to ./savor.db).

pub mod queries;
pub mod schema;
pub mod source;

pub use source::SqliteReviewSource;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::debug;

/// Create the review database if needed and bring its schema up to date.
///
/// Called by `savor import` before inserting.
pub fn initialize(db_path: &str) -> Result<Connection> {
    // An import may name a directory that doesn't exist yet
    if let Some(parent) = Path::new(db_path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory for {db_path}"))?;
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to create review database at {db_path}"))?;
    use_wal(&conn)?;

    // Schema creation is idempotent, so re-importing into the same file is fine
    schema::create_tables(&conn)?;
    debug!(db = db_path, "Review database ready for import");

    Ok(conn)
}

/// Open a review database written by an earlier import.
///
/// Never creates a file. Fails when the path is missing, when the file is
/// not a savor database, or when its schema version is not the one this
/// build reads.
pub fn open(db_path: &str) -> Result<Connection> {
    // Read-write without CREATE: a missing path errors instead of leaving
    // an empty database behind
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(db_path, flags).with_context(|| {
        format!("Database not found at {db_path}. Run `savor import <reviews.json>` first.")
    })?;

    match schema::current_version(&conn)? {
        Some(version) if version == schema::SCHEMA_VERSION => {}
        Some(version) => anyhow::bail!(
            "Review database at {db_path} has schema version {version}, expected {}. \
             Import into a new SAVOR_DB_PATH instead.",
            schema::SCHEMA_VERSION
        ),
        None => anyhow::bail!(
            "{db_path} is not a savor review database. Run `savor import <reviews.json>` to create one."
        ),
    }

    use_wal(&conn)?;
    Ok(conn)
}

/// WAL lets a status check read while an import is writing.
fn use_wal(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")
        .context("Failed to enable WAL journal mode")
}
