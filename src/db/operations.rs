use anyhow::Result;
use rusqlite::{params, OptionalExtension};

use crate::db::connection::DatabaseConnection;

/// Reads and writes of persisted state blobs
pub struct DbOperations;

impl DbOperations {
    /// Get the stored value for `key`
    pub fn get_state(db: &DatabaseConnection, key: &str) -> Result<Option<String>> {
        db.with_conn(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM app_state WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    /// Store `value` under `key`
    ///
    /// Returns `false` when the stored blob already has the same content,
    /// in which case nothing is written.
    pub fn put_state(db: &DatabaseConnection, key: &str, value: &str) -> Result<bool> {
        let hash = blake3::hash(value.as_bytes()).to_hex().to_string();

        db.with_conn(|conn| {
            let existing: Option<String> = conn
                .query_row(
                    "SELECT value_hash FROM app_state WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            if existing.as_deref() == Some(hash.as_str()) {
                return Ok(false);
            }

            let now = chrono::Utc::now().timestamp();
            conn.execute(
                "INSERT INTO app_state (key, value, value_hash, date_modified) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    value_hash = excluded.value_hash,
                    date_modified = excluded.date_modified",
                params![key, value, hash, now],
            )?;
            Ok(true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let db = DatabaseConnection::in_memory().unwrap();
        assert_eq!(DbOperations::get_state(&db, "k").unwrap(), None);

        assert!(DbOperations::put_state(&db, "k", "one").unwrap());
        assert_eq!(DbOperations::get_state(&db, "k").unwrap().as_deref(), Some("one"));

        assert!(DbOperations::put_state(&db, "k", "two").unwrap());
        assert_eq!(DbOperations::get_state(&db, "k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_unchanged_value_is_skipped() {
        let db = DatabaseConnection::in_memory().unwrap();
        assert!(DbOperations::put_state(&db, "k", "same").unwrap());
        assert!(!DbOperations::put_state(&db, "k", "same").unwrap());
    }
}
