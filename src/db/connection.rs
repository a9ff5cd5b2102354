// Shared SQLite handle backing the state store
use anyhow::{Context, Result};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

use super::migrations::run_migrations;

/// Cheap to clone; every clone talks to the same connection
#[derive(Clone)]
pub struct DatabaseConnection {
    conn: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Opens (or creates) the database file and brings its schema up to date
    pub fn new(db_path: &Path) -> Result<Self> {
        if let Some(dir) = db_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {dir:?}"))?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database {db_path:?}"))?;
        Self::migrated(conn)
    }

    /// Private database that lives as long as the connection
    pub fn in_memory() -> Result<Self> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self> {
        run_migrations(&conn).context("Failed to prepare state tables")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` while holding the connection lock
    pub fn with_conn<R>(&self, f: impl FnOnce(&Connection) -> Result<R>) -> Result<R> {
        let conn = self.conn.lock();
        f(&conn)
    }
}
