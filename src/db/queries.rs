// Database queries: every SQL statement lives here.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::ratings::Review;

/// Insert reviews in a single transaction. Returns the number inserted.
pub fn insert_reviews(conn: &mut Connection, reviews: &[Review]) -> Result<usize> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO reviews (user_id, restaurant, rating) VALUES (?1, ?2, ?3)",
        )?;
        for review in reviews {
            stmt.execute(params![review.user_id, review.restaurant, review.rating])
                .with_context(|| {
                    format!(
                        "Failed to insert review by {} for {}",
                        review.user_id, review.restaurant
                    )
                })?;
        }
    }
    tx.commit()?;
    Ok(reviews.len())
}

/// Load every review in insertion order.
pub fn load_reviews(conn: &Connection) -> Result<Vec<Review>> {
    let mut stmt = conn.prepare("SELECT user_id, restaurant, rating FROM reviews ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Review {
            user_id: row.get(0)?,
            restaurant: row.get(1)?,
            rating: row.get(2)?,
        })
    })?;

    let mut reviews = Vec::new();
    for row in rows {
        reviews.push(row?);
    }
    Ok(reviews)
}

/// Total number of stored reviews.
pub fn review_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?;
    Ok(count)
}

/// Delete every stored review (used by `savor import --replace`).
pub fn clear_reviews(conn: &Connection) -> Result<usize> {
    let deleted = conn.execute("DELETE FROM reviews", [])?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_and_load_keep_order() {
        let mut conn = test_conn();
        let reviews = vec![
            Review::new("u2", "Bistro", 4.0),
            Review::new("u1", "Bistro", 3.5),
            Review::new("u2", "Bistro", 5.0),
        ];
        assert_eq!(insert_reviews(&mut conn, &reviews).unwrap(), 3);
        assert_eq!(load_reviews(&conn).unwrap(), reviews);
        assert_eq!(review_count(&conn).unwrap(), 3);
    }

    #[test]
    fn test_clear_reviews() {
        let mut conn = test_conn();
        insert_reviews(&mut conn, &[Review::new("u", "Cafe", 2.0)]).unwrap();
        assert_eq!(clear_reviews(&conn).unwrap(), 1);
        assert_eq!(review_count(&conn).unwrap(), 0);
    }
}
