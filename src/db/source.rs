// SqliteReviewSource: the ReviewSource implementation backed by rusqlite.
//
// The Connection is wrapped in a std Mutex because Connection is !Sync and
// ReviewSource requires Send + Sync.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use rusqlite::Connection;
use tracing::info;

use crate::ratings::{Review, ReviewSource};

pub struct SqliteReviewSource {
    conn: Mutex<Connection>,
    label: String,
}

impl SqliteReviewSource {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection, label: impl Into<String>) -> Self {
        Self {
            conn: Mutex::new(conn),
            label: label.into(),
        }
    }

    /// Open the database at `db_path` (it must already exist).
    pub fn open(db_path: &str) -> Result<Self> {
        Ok(Self::new(super::open(db_path)?, db_path))
    }

    pub fn review_count(&self) -> Result<i64> {
        let conn = self.lock()?;
        super::queries::review_count(&conn)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("SQLite connection mutex poisoned"))
    }
}

impl ReviewSource for SqliteReviewSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn load_reviews(&self) -> Result<Vec<Review>> {
        let conn = self.lock()?;
        let reviews = super::queries::load_reviews(&conn)?;
        info!(count = reviews.len(), db = %self.label, "Reviews loaded");
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{queries, schema};

    #[test]
    fn test_loads_what_was_inserted() {
        let mut conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        queries::insert_reviews(&mut conn, &[Review::new("u1", "Diner", 3.0)]).unwrap();

        let source = SqliteReviewSource::new(conn, ":memory:");
        assert_eq!(source.review_count().unwrap(), 1);
        assert_eq!(source.load_reviews().unwrap(), vec![Review::new("u1", "Diner", 3.0)]);
        assert_eq!(source.describe(), ":memory:");
    }
}
