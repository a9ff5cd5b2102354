// Player service: queue sequencing on top of an injected audio transport
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::transport::AudioTransport;
use crate::models::{RepeatMode, Track};
use crate::queue::{PlayerSnapshot, QueueManager, SnapshotStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportAction {
    Load,
    Play,
    Pause,
    Stop,
    Seek,
    SetVolume,
    Cleanup,
}

impl fmt::Display for TransportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            TransportAction::Load => "load track",
            TransportAction::Play => "play",
            TransportAction::Pause => "pause",
            TransportAction::Stop => "stop",
            TransportAction::Seek => "seek",
            TransportAction::SetVolume => "set volume",
            TransportAction::Cleanup => "clean up",
        };
        f.write_str(verb)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayerError {
    #[error("Failed to {action}: {message}")]
    Transport {
        action: TransportAction,
        message: String,
    },
}

/// Playback flags the UI renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub is_playing: bool,
    pub is_loading: bool,
    pub position_ms: u64,
    /// 0.0..=1.0
    pub volume: f32,
    /// Last transport failure, replaced by the next one
    pub error: Option<String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            is_playing: false,
            is_loading: false,
            position_ms: 0,
            volume: 1.0,
            error: None,
        }
    }
}

/// Queue-aware player
///
/// Transport failures never escape as panics: each operation stores the
/// message in [`PlayerState::error`], clears the loading flag and also
/// returns it as a [`PlayerError`]. Queue, shuffle, repeat and volume
/// changes are written through the [`SnapshotStore`]; a failing store is
/// only logged.
pub struct Player<T: AudioTransport, S: SnapshotStore> {
    transport: T,
    store: S,
    rng: Box<dyn RngCore + Send>,
    queue: QueueManager,
    repeat_mode: RepeatMode,
    state: PlayerState,
}

impl<T: AudioTransport, S: SnapshotStore> Player<T, S> {
    pub fn new(transport: T, store: S) -> Self {
        Self {
            transport,
            store,
            rng: Box::new(StdRng::from_entropy()),
            queue: QueueManager::new(),
            repeat_mode: RepeatMode::None,
            state: PlayerState::default(),
        }
    }

    /// Replace the random source used for shuffling
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Volume to start with before any saved state is restored
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.state.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn queue(&self) -> &QueueManager {
        &self.queue
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current_track()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            volume: self.state.volume,
            repeat_mode: self.repeat_mode,
            queue: self.queue.snapshot(),
        }
    }

    /// Apply the saved snapshot, returns whether one was found
    ///
    /// Playback is not resumed and position starts at zero.
    pub fn restore(&mut self) -> bool {
        match self.store.load() {
            Ok(Some(snapshot)) => {
                self.state.volume = snapshot.volume.clamp(0.0, 1.0);
                self.repeat_mode = snapshot.repeat_mode;
                self.queue = QueueManager::restore(snapshot.queue);
                log::info!(
                    "[Player] Restored queue of {} tracks",
                    self.queue.len()
                );
                true
            }
            Ok(None) => false,
            Err(err) => {
                log::warn!("[Player] Failed to restore player state: {err:#}");
                false
            }
        }
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.snapshot()) {
            log::warn!("[Player] Failed to persist player state: {err:#}");
        }
    }

    /// Settle a transport call: loading is cleared on every path
    fn settle(
        &mut self,
        action: TransportAction,
        result: anyhow::Result<()>,
    ) -> Result<(), PlayerError> {
        self.state.is_loading = false;
        result.map_err(|err| {
            let err = PlayerError::Transport {
                action,
                message: format!("{err:#}"),
            };
            log::error!("[Player] {err}");
            self.state.error = Some(err.to_string());
            err
        })
    }

    // ===== Queue =====

    pub fn set_queue(&mut self, tracks: &[Track], start_index: usize) {
        self.queue.set_queue(tracks, start_index);
        self.persist();
    }

    pub fn add_to_queue(&mut self, track: Track) {
        self.queue.add(track);
        self.persist();
    }

    pub fn remove_from_queue(&mut self, index: usize) -> Option<Track> {
        let removed = self.queue.remove(index);
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.persist();
    }

    /// Returns the new shuffle state
    pub fn toggle_shuffle(&mut self) -> bool {
        let shuffled = self.queue.toggle_shuffle(&mut *self.rng);
        log::debug!("[Player] Shuffle {}", if shuffled { "on" } else { "off" });
        self.persist();
        shuffled
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
        self.persist();
    }

    // ===== Transport =====

    pub async fn load_track(&mut self, track: &Track) -> Result<(), PlayerError> {
        self.state.is_loading = true;
        self.state.error = None;
        let result = self.transport.load(track).await;
        // Loading replaces the playing track whether or not it succeeds
        self.state.is_playing = false;
        self.settle(TransportAction::Load, result)?;
        self.state.position_ms = 0;
        Ok(())
    }

    pub async fn play(&mut self) -> Result<(), PlayerError> {
        let result = self.transport.play().await;
        self.settle(TransportAction::Play, result)?;
        self.state.is_playing = true;
        Ok(())
    }

    pub async fn pause(&mut self) -> Result<(), PlayerError> {
        let result = self.transport.pause().await;
        self.settle(TransportAction::Pause, result)?;
        self.state.is_playing = false;
        Ok(())
    }

    /// Stop and rewind; the queue is kept
    pub async fn stop(&mut self) -> Result<(), PlayerError> {
        let result = self.transport.stop().await;
        self.settle(TransportAction::Stop, result)?;
        self.state.is_playing = false;
        self.state.position_ms = 0;
        Ok(())
    }

    pub async fn seek_to(&mut self, position_ms: u64) -> Result<(), PlayerError> {
        let result = self.transport.seek_to(position_ms).await;
        self.settle(TransportAction::Seek, result)?;
        self.state.position_ms = position_ms;
        Ok(())
    }

    pub async fn set_volume(&mut self, volume: f32) -> Result<(), PlayerError> {
        let volume = volume.clamp(0.0, 1.0);
        let result = self.transport.set_volume(volume).await;
        self.settle(TransportAction::SetVolume, result)?;
        self.state.volume = volume;
        self.persist();
        Ok(())
    }

    /// Release the transport and forget the queue
    pub async fn cleanup(&mut self) -> Result<(), PlayerError> {
        let result = self.transport.cleanup().await;
        self.settle(TransportAction::Cleanup, result)?;
        self.queue.clear();
        self.state = PlayerState {
            volume: self.state.volume,
            ..PlayerState::default()
        };
        self.persist();
        Ok(())
    }

    // ===== Sequencing =====

    /// Play `track`, optionally replacing the queue with `queue`
    ///
    /// The new current index is the first entry with the same id, or 0.
    /// If the track fails to load, the previous queue is kept.
    pub async fn play_track(
        &mut self,
        track: &Track,
        queue: Option<&[Track]>,
    ) -> Result<(), PlayerError> {
        self.load_track(track).await?;
        if let Some(tracks) = queue {
            let start = tracks
                .iter()
                .position(|candidate| candidate.id == track.id)
                .unwrap_or(0);
            self.set_queue(tracks, start);
        }
        self.play().await
    }

    /// Load the track at `index` and make it current once it loaded
    async fn play_at(&mut self, index: usize) -> Result<(), PlayerError> {
        let Some(track) = self.queue.tracks().get(index).cloned() else {
            return Ok(());
        };
        self.load_track(&track).await?;
        self.queue.set_current_index(index);
        self.persist();
        self.play().await
    }

    /// Advance; past the end only wraps under repeat-all
    pub async fn play_next(&mut self) -> Result<(), PlayerError> {
        let Some(next) = self.queue.next_index(self.repeat_mode) else {
            log::debug!("[Player] End of queue");
            return Ok(());
        };
        self.play_at(next).await
    }

    /// Step back; wraps to the last track regardless of repeat mode
    pub async fn play_previous(&mut self) -> Result<(), PlayerError> {
        let Some(previous) = self.queue.previous_index() else {
            return Ok(());
        };
        self.play_at(previous).await
    }

    /// Called by the shell when the transport finishes a track
    pub async fn handle_track_ended(&mut self) -> Result<(), PlayerError> {
        if self.repeat_mode == RepeatMode::One && self.queue.current_track().is_some() {
            self.seek_to(0).await?;
            return self.play().await;
        }
        if self.queue.next_index(self.repeat_mode).is_none() {
            self.state.is_playing = false;
            self.state.position_ms = 0;
            return Ok(());
        }
        self.play_next().await
    }
}
