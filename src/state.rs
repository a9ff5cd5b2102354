// Application state management
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::audio::{AudioTransport, Player};
use crate::db::{DatabaseConnection, SqliteStore};
use crate::queue::{JsonFileStore, NoopStore, SnapshotStore};
use crate::settings::{AppSettings, StorageBackend};

pub type SharedPlayer<T> = Arc<Mutex<Player<T, Box<dyn SnapshotStore>>>>;

/// Composition root owned by the embedding shell
///
/// The player sits behind an async mutex, so UI callbacks issue transport
/// commands one at a time.
pub struct AppState<T: AudioTransport> {
    pub player: SharedPlayer<T>,
    pub settings: AppSettings,
    pub app_dir: PathBuf,
}

impl<T: AudioTransport> AppState<T> {
    pub fn new(player: Player<T, Box<dyn SnapshotStore>>, settings: AppSettings, app_dir: PathBuf) -> Self {
        Self {
            player: Arc::new(Mutex::new(player)),
            settings,
            app_dir,
        }
    }

    /// Load settings from `app_dir`, open the configured store and restore
    /// the saved player state
    pub fn open(app_dir: &Path, transport: T) -> Self {
        let settings = AppSettings::load(app_dir).unwrap_or_else(|err| {
            log::warn!("[Settings] {err:#}, using defaults");
            AppSettings::default()
        });

        let store = open_store(app_dir, &settings);
        let mut player = Player::new(transport, store).with_volume(settings.playback.default_volume);
        player.restore();

        Self::new(player, settings, app_dir.to_path_buf())
    }
}

/// Pick the snapshot store; an unusable database only costs persistence
fn open_store(app_dir: &Path, settings: &AppSettings) -> Box<dyn SnapshotStore> {
    if !settings.playback.persist_state {
        return Box::new(NoopStore);
    }
    match settings.playback.storage_backend {
        StorageBackend::Json => Box::new(JsonFileStore::new(app_dir)),
        StorageBackend::Sqlite => match DatabaseConnection::new(&app_dir.join("stemvest.db")) {
            Ok(db) => Box::new(SqliteStore::new(db)),
            Err(err) => {
                log::warn!("[Store] Failed to open database, player state will not be saved: {err:#}");
                Box::new(NoopStore)
            }
        },
    }
}
