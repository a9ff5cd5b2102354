// Audio playback module
// The transport is injected, the player sequences the queue on top of it

pub mod player;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use player::{Player, PlayerError, PlayerState, TransportAction};
pub use transport::AudioTransport;
