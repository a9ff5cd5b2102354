// Queue sequencing: order, current position, shuffle and restore
use rand::Rng;

use crate::models::{RepeatMode, Track};

use super::persistence::QueueSnapshot;

/// Ordered playback queue with a saved insertion order for unshuffling
///
/// The current track is always `queue[current_index]`. When the queue is
/// non-empty and something is current, the index is in bounds.
#[derive(Debug, Clone, Default)]
pub struct QueueManager {
    queue: Vec<Track>,
    original_queue: Vec<Track>,
    current_index: Option<usize>,
    is_shuffled: bool,
}

impl QueueManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.queue
    }

    pub fn original_tracks(&self) -> &[Track] {
        &self.original_queue
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|index| self.queue.get(index))
    }

    pub fn is_shuffled(&self) -> bool {
        self.is_shuffled
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// First position of the track with `id`
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.queue.iter().position(|track| track.id == id)
    }

    /// Replace the queue and its saved order, start index is clamped
    pub fn set_queue(&mut self, tracks: &[Track], start_index: usize) {
        self.queue = tracks.to_vec();
        self.original_queue = tracks.to_vec();
        self.current_index = if tracks.is_empty() {
            None
        } else {
            Some(start_index.min(tracks.len() - 1))
        };
    }

    /// Point at `index` if it exists in the queue
    pub fn set_current_index(&mut self, index: usize) -> bool {
        if index < self.queue.len() {
            self.current_index = Some(index);
            true
        } else {
            false
        }
    }

    pub fn add(&mut self, track: Track) {
        self.original_queue.push(track.clone());
        self.queue.push(track);
    }

    /// Remove by position, returns the removed track
    ///
    /// Removing the current track leaves the index where it is, which makes
    /// the following track current without starting it.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.queue.len() {
            return None;
        }
        let removed = self.queue.remove(index);

        let original_position = if self.is_shuffled {
            self.original_queue.iter().position(|track| track.id == removed.id)
        } else {
            Some(index).filter(|&i| i < self.original_queue.len())
        };
        if let Some(position) = original_position {
            self.original_queue.remove(position);
        }

        self.current_index = match self.current_index {
            _ if self.queue.is_empty() => None,
            Some(current) if index < current => Some(current - 1),
            Some(current) => Some(current.min(self.queue.len() - 1)),
            None => None,
        };
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.original_queue.clear();
        self.current_index = None;
    }

    /// Index `play_next` should move to
    ///
    /// Past the end only wraps under [`RepeatMode::All`]; `None` means the
    /// queue is empty or playback reached the end.
    pub fn next_index(&self, repeat_mode: RepeatMode) -> Option<usize> {
        if self.queue.is_empty() {
            return None;
        }
        let next = self.current_index.map_or(0, |current| current + 1);
        if next < self.queue.len() {
            Some(next)
        } else if repeat_mode == RepeatMode::All {
            Some(0)
        } else {
            None
        }
    }

    /// Index `play_previous` should move to, always wraps at the start
    pub fn previous_index(&self) -> Option<usize> {
        if self.queue.is_empty() {
            return None;
        }
        match self.current_index {
            Some(current) if current > 0 => Some(current - 1),
            _ => Some(self.queue.len() - 1),
        }
    }

    /// Flip shuffle on or off, returns the new state
    pub fn toggle_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_shuffled {
            self.unshuffle();
        } else {
            self.shuffle(rng);
        }
        self.is_shuffled
    }

    fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut shuffled = self.queue.clone();
        if let Some(current) = self.current_index.filter(|&i| i > 0) {
            let track = shuffled.remove(current);
            shuffled.insert(0, track);
        }

        // Fisher-Yates over 1..len, slot 0 keeps the current track
        for i in (2..shuffled.len()).rev() {
            let j = rng.gen_range(1..=i);
            shuffled.swap(i, j);
        }

        self.current_index = if shuffled.is_empty() { None } else { Some(0) };
        self.queue = shuffled;
        self.is_shuffled = true;
    }

    fn unshuffle(&mut self) {
        let current_id = self.current_track().map(|track| track.id.clone());
        self.queue = self.original_queue.clone();
        self.current_index = if self.queue.is_empty() {
            None
        } else {
            Some(
                current_id
                    .and_then(|id| self.position_of(&id))
                    .unwrap_or(0),
            )
        };
        self.is_shuffled = false;
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            queue: self.queue.clone(),
            original_queue: self.original_queue.clone(),
            current_index: self.current_index,
            is_shuffled: self.is_shuffled,
        }
    }

    /// Rebuild from a persisted snapshot, dropping a dangling index
    pub fn restore(snapshot: QueueSnapshot) -> Self {
        let current_index = snapshot
            .current_index
            .filter(|&index| index < snapshot.queue.len());
        Self {
            queue: snapshot.queue,
            original_queue: snapshot.original_queue,
            current_index,
            is_shuffled: snapshot.is_shuffled,
        }
    }
}
