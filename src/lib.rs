// Stemvest - playback queue and investment projection core
// Module declarations
pub mod audio;
pub mod commands;
pub mod db;
pub mod invest;
pub mod models;
pub mod queue;
pub mod settings;
pub mod state;

pub use audio::{AudioTransport, Player, PlayerError, PlayerState};
pub use models::{RepeatMode, StreamingHistory, Track};
pub use state::AppState;
