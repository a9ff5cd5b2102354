// Player snapshot storage on top of the app_state table
use anyhow::{Context, Result};

use super::connection::DatabaseConnection;
use super::operations::DbOperations;
use crate::queue::{PlayerSnapshot, SnapshotStore, PLAYER_STATE_KEY};

#[derive(Clone)]
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SnapshotStore for SqliteStore {
    fn load(&self) -> Result<Option<PlayerSnapshot>> {
        let Some(json) = DbOperations::get_state(&self.db, PLAYER_STATE_KEY)
            .context("Failed to read player state")?
        else {
            return Ok(None);
        };
        PlayerSnapshot::from_json(&json).map(Some)
    }

    fn save(&self, snapshot: &PlayerSnapshot) -> Result<()> {
        let json = snapshot.to_json()?;
        if DbOperations::put_state(&self.db, PLAYER_STATE_KEY, &json)
            .context("Failed to write player state")?
        {
            log::debug!("[Store] Saved player state to database");
        }
        Ok(())
    }
}
