// Audio transport seam
// Decoding and output live in the embedding shell; the player only drives it

use anyhow::Result;
use std::future::Future;

use crate::models::Track;

/// Playback backend driven by [`Player`](super::player::Player)
///
/// Every call may suspend on I/O. Implementations report failures through
/// the returned `Result`; the player turns them into a stored error.
/// When a track finishes, the shell should call
/// [`Player::handle_track_ended`](super::player::Player::handle_track_ended)
/// so that repeat-one is honored.
pub trait AudioTransport: Send {
    fn load(&mut self, track: &Track) -> impl Future<Output = Result<()>> + Send;

    fn play(&mut self) -> impl Future<Output = Result<()>> + Send;

    fn pause(&mut self) -> impl Future<Output = Result<()>> + Send;

    fn stop(&mut self) -> impl Future<Output = Result<()>> + Send;

    fn seek_to(&mut self, position_ms: u64) -> impl Future<Output = Result<()>> + Send;

    /// `level` is already clamped to 0.0..=1.0
    fn set_volume(&mut self, level: f32) -> impl Future<Output = Result<()>> + Send;

    fn cleanup(&mut self) -> impl Future<Output = Result<()>> + Send;
}
