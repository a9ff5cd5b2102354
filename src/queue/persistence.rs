// Saving and restoring player state across restarts
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{RepeatMode, Track};

/// Storage identifier of the persisted player state
pub const PLAYER_STATE_KEY: &str = "player-storage";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueSnapshot {
    pub queue: Vec<Track>,
    pub original_queue: Vec<Track>,
    pub current_index: Option<usize>,
    pub is_shuffled: bool,
}

/// Everything that survives a restart
///
/// Position and loading flags are not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub volume: f32,
    pub repeat_mode: RepeatMode,
    #[serde(flatten)]
    pub queue: QueueSnapshot,
}

impl PlayerSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize player state")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse player state")
    }
}

/// Blob storage for the player snapshot
pub trait SnapshotStore: Send {
    fn load(&self) -> Result<Option<PlayerSnapshot>>;
    fn save(&self, snapshot: &PlayerSnapshot) -> Result<()>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&self) -> Result<Option<PlayerSnapshot>> {
        (**self).load()
    }

    fn save(&self, snapshot: &PlayerSnapshot) -> Result<()> {
        (**self).save(snapshot)
    }
}

/// Store that keeps nothing, for shells with persistence turned off
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl SnapshotStore for NoopStore {
    fn load(&self) -> Result<Option<PlayerSnapshot>> {
        Ok(None)
    }

    fn save(&self, _snapshot: &PlayerSnapshot) -> Result<()> {
        Ok(())
    }
}

/// Snapshot as a JSON file in the app data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(app_dir: &Path) -> Self {
        Self {
            path: app_dir.join(format!("{PLAYER_STATE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<PlayerSnapshot>> {
        if !self.path.exists() {
            log::info!("[Store] No saved player state at {:?}", self.path);
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        PlayerSnapshot::from_json(&content).map(Some)
    }

    fn save(&self, snapshot: &PlayerSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create state directory")?;
        }

        let content =
            serde_json::to_string_pretty(snapshot).context("Failed to serialize player state")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {:?}", self.path))?;

        log::debug!("[Store] Saved player state to {:?}", self.path);
        Ok(())
    }
}
