// Command handlers called by the UI shell
use serde::Serialize;

use crate::audio::{AudioTransport, PlayerState};
use crate::invest::{
    compute_investment_basics, compute_projections_with, funding_progress, parse_amount,
    simple_estimate, FundingProgress, InvestmentBasics, Projection, SimpleEstimate,
};
use crate::models::{RepeatMode, Track};
use crate::state::AppState;

// ===== Investment Commands =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSummary {
    pub basics: InvestmentBasics,
    /// One message per failed validity rule
    pub messages: Vec<String>,
    pub projections: Vec<Projection>,
    pub simple: SimpleEstimate,
    pub funding: FundingProgress,
}

/// Everything the invest screen shows for the typed `amount`
pub fn calculate_investment<T: AudioTransport>(
    state: &AppState<T>,
    track: &Track,
    amount: &str,
) -> Result<InvestmentSummary, String> {
    let amount = parse_amount(amount);

    let basics = compute_investment_basics(track, amount)
        .map_err(|e| format!("Failed to calculate investment: {}", e))?;
    let projections = compute_projections_with(&state.settings.projection, track, amount)
        .map_err(|e| format!("Failed to project returns: {}", e))?;

    Ok(InvestmentSummary {
        messages: basics.issues.iter().map(ToString::to_string).collect(),
        basics,
        projections,
        simple: simple_estimate(track, amount),
        funding: funding_progress(track),
    })
}

// ===== Playback Commands =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateResponse {
    #[serde(flatten)]
    pub state: PlayerState,
    pub current_track: Option<Track>,
    pub current_index: Option<usize>,
    pub queue: Vec<Track>,
    pub is_shuffled: bool,
    pub repeat_mode: RepeatMode,
}

pub async fn get_player_state<T: AudioTransport>(
    state: &AppState<T>,
) -> Result<PlayerStateResponse, String> {
    let player = state.player.lock().await;

    Ok(PlayerStateResponse {
        state: player.state().clone(),
        current_track: player.current_track().cloned(),
        current_index: player.queue().current_index(),
        queue: player.queue().tracks().to_vec(),
        is_shuffled: player.queue().is_shuffled(),
        repeat_mode: player.repeat_mode(),
    })
}

pub async fn play_track<T: AudioTransport>(
    state: &AppState<T>,
    track: Track,
    queue: Option<Vec<Track>>,
) -> Result<(), String> {
    let mut player = state.player.lock().await;
    player
        .play_track(&track, queue.as_deref())
        .await
        .map_err(|e| e.to_string())
}

/// Play when paused, pause when playing
pub async fn toggle_playback<T: AudioTransport>(state: &AppState<T>) -> Result<bool, String> {
    let mut player = state.player.lock().await;
    if player.state().is_playing {
        player.pause().await.map_err(|e| e.to_string())?;
    } else {
        player.play().await.map_err(|e| e.to_string())?;
    }
    Ok(player.state().is_playing)
}

pub async fn stop_playback<T: AudioTransport>(state: &AppState<T>) -> Result<(), String> {
    let mut player = state.player.lock().await;
    player.stop().await.map_err(|e| e.to_string())
}

pub async fn next_track<T: AudioTransport>(state: &AppState<T>) -> Result<(), String> {
    let mut player = state.player.lock().await;
    player.play_next().await.map_err(|e| e.to_string())
}

pub async fn previous_track<T: AudioTransport>(state: &AppState<T>) -> Result<(), String> {
    let mut player = state.player.lock().await;
    player.play_previous().await.map_err(|e| e.to_string())
}

pub async fn track_ended<T: AudioTransport>(state: &AppState<T>) -> Result<(), String> {
    let mut player = state.player.lock().await;
    player.handle_track_ended().await.map_err(|e| e.to_string())
}

pub async fn seek<T: AudioTransport>(state: &AppState<T>, position_ms: u64) -> Result<(), String> {
    let mut player = state.player.lock().await;
    player.seek_to(position_ms).await.map_err(|e| e.to_string())
}

pub async fn set_volume<T: AudioTransport>(state: &AppState<T>, volume: f32) -> Result<(), String> {
    let mut player = state.player.lock().await;
    player.set_volume(volume).await.map_err(|e| e.to_string())
}

pub async fn toggle_shuffle<T: AudioTransport>(state: &AppState<T>) -> Result<bool, String> {
    let mut player = state.player.lock().await;
    Ok(player.toggle_shuffle())
}

pub async fn set_repeat_mode<T: AudioTransport>(
    state: &AppState<T>,
    mode: RepeatMode,
) -> Result<(), String> {
    let mut player = state.player.lock().await;
    player.set_repeat_mode(mode);
    Ok(())
}

// ===== Queue Commands =====

pub async fn add_to_queue<T: AudioTransport>(state: &AppState<T>, track: Track) -> Result<(), String> {
    let mut player = state.player.lock().await;
    player.add_to_queue(track);
    Ok(())
}

pub async fn remove_from_queue<T: AudioTransport>(
    state: &AppState<T>,
    index: usize,
) -> Result<Track, String> {
    let mut player = state.player.lock().await;
    player
        .remove_from_queue(index)
        .ok_or_else(|| format!("No track at queue position {}", index))
}

pub async fn clear_queue<T: AudioTransport>(state: &AppState<T>) -> Result<(), String> {
    let mut player = state.player.lock().await;
    player.clear_queue();
    Ok(())
}

pub async fn cleanup<T: AudioTransport>(state: &AppState<T>) -> Result<(), String> {
    let mut player = state.player.lock().await;
    player.cleanup().await.map_err(|e| e.to_string())
}
