// Queue management module
// This module handles playback queue ordering and its persistence

pub mod manager;
pub mod persistence;

pub use manager::QueueManager;
pub use persistence::{
    JsonFileStore, NoopStore, PlayerSnapshot, QueueSnapshot, SnapshotStore, PLAYER_STATE_KEY,
};
