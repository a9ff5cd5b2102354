use std::sync::Arc;

use anyhow::{bail, Result};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stemvest::commands;
use stemvest::db::{DatabaseConnection, SqliteStore};
use stemvest::invest::{compute_investment_basics, compute_projections, InvestmentIssue};
use stemvest::queue::JsonFileStore;
use stemvest::{AppState, AudioTransport, Player, RepeatMode, StreamingHistory, Track};

/// Transport that logs calls into a shared list so the test can inspect
/// them after handing the transport to the player.
#[derive(Clone, Default)]
struct SharedTransport {
    calls: Arc<Mutex<Vec<String>>>,
    broken: Arc<Mutex<bool>>,
}

impl SharedTransport {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn push(&self, call: String) -> Result<()> {
        self.calls.lock().push(call);
        if *self.broken.lock() {
            bail!("audio session interrupted");
        }
        Ok(())
    }
}

impl AudioTransport for SharedTransport {
    async fn load(&mut self, track: &Track) -> Result<()> {
        self.push(format!("load:{}", track.id))
    }

    async fn play(&mut self) -> Result<()> {
        self.push("play".into())
    }

    async fn pause(&mut self) -> Result<()> {
        self.push("pause".into())
    }

    async fn stop(&mut self) -> Result<()> {
        self.push("stop".into())
    }

    async fn seek_to(&mut self, position_ms: u64) -> Result<()> {
        self.push(format!("seek:{position_ms}"))
    }

    async fn set_volume(&mut self, level: f32) -> Result<()> {
        self.push(format!("volume:{level}"))
    }

    async fn cleanup(&mut self) -> Result<()> {
        self.push("cleanup".into())
    }
}

fn album() -> Vec<Track> {
    (1..=6)
        .map(|n| Track::new(format!("track-{n}"), format!("Song {n}"), "The Band"))
        .collect()
}

fn ids(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|t| t.id.clone()).collect()
}

#[tokio::test]
async fn shuffle_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let transport = SharedTransport::default();
    let tracks = album();

    let mut player = Player::new(transport.clone(), JsonFileStore::new(dir.path()))
        .with_rng(StdRng::seed_from_u64(2024));
    player.play_track(&tracks[3], Some(&tracks)).await.unwrap();
    assert!(player.toggle_shuffle());
    assert_eq!(player.queue().tracks()[0].id, "track-4");
    player.set_repeat_mode(RepeatMode::All);
    let shuffled = ids(player.queue().tracks());

    let mut restarted = Player::new(SharedTransport::default(), JsonFileStore::new(dir.path()));
    assert!(restarted.restore());
    assert_eq!(ids(restarted.queue().tracks()), shuffled);
    assert!(restarted.queue().is_shuffled());
    assert_eq!(restarted.repeat_mode(), RepeatMode::All);

    // Turning shuffle off after the restart still restores album order
    assert!(!restarted.toggle_shuffle());
    assert_eq!(ids(restarted.queue().tracks()), ids(&tracks));
    assert_eq!(restarted.current_track().unwrap().id, "track-4");

    assert_eq!(transport.calls(), vec!["load:track-4", "play"]);
}

#[tokio::test]
async fn repeat_all_walks_the_whole_queue() {
    let store = SqliteStore::new(DatabaseConnection::in_memory().unwrap());
    let transport = SharedTransport::default();
    let tracks = album();

    let mut player = Player::new(transport.clone(), store);
    player.set_queue(&tracks, 0);
    player.set_repeat_mode(RepeatMode::All);

    let mut visited = Vec::new();
    for _ in 0..tracks.len() {
        player.play_next().await.unwrap();
        visited.push(player.current_track().unwrap().id.clone());
    }
    assert_eq!(
        visited,
        vec!["track-2", "track-3", "track-4", "track-5", "track-6", "track-1"]
    );
}

#[tokio::test]
async fn broken_transport_leaves_queue_usable() {
    let dir = tempfile::tempdir().unwrap();
    let transport = SharedTransport::default();
    let state = AppState::open(dir.path(), transport.clone());
    let tracks = album();

    commands::play_track(&state, tracks[0].clone(), Some(tracks.clone()))
        .await
        .unwrap();

    *transport.broken.lock() = true;
    let err = commands::next_track(&state).await.unwrap_err();
    assert_eq!(err, "Failed to load track: audio session interrupted");

    let response = commands::get_player_state(&state).await.unwrap();
    assert!(!response.state.is_loading);
    assert_eq!(response.state.error.as_deref(), Some(err.as_str()));
    // Nothing is playing and the queue still points at the last good track
    assert!(!response.state.is_playing);
    assert_eq!(response.current_index, Some(0));
    assert_eq!(response.current_track.unwrap().id, "track-1");

    *transport.broken.lock() = false;
    commands::next_track(&state).await.unwrap();
    let response = commands::get_player_state(&state).await.unwrap();
    assert!(response.state.is_playing);
    assert_eq!(response.state.error, None);
    assert_eq!(response.current_track.unwrap().id, "track-2");
}

#[test]
fn investment_screen_numbers() {
    let track = Track {
        funding_goal: 100_000.0,
        total_shares: 10_000,
        available_shares: 1_500,
        minimum_investment: 100.0,
        streaming: StreamingHistory {
            average_streams_per_month: 50_000.0,
            revenue_per_stream: 0.004,
            growth_rate: 0.15,
        },
        ..Track::new("hit", "Hit", "Nova")
    };

    let ok = compute_investment_basics(&track, 1000.0).unwrap();
    assert!(ok.is_valid);
    assert_eq!(ok.shares, 100);

    let low = compute_investment_basics(&track, 50.0).unwrap();
    assert_eq!(low.issues, vec![InvestmentIssue::BelowMinimum { minimum: 100.0 }]);

    let greedy = compute_investment_basics(&track, 20_000.0).unwrap();
    assert!(matches!(
        greedy.issues.as_slice(),
        [InvestmentIssue::InsufficientShares { requested: 2000, available: 1500 }]
    ));

    assert!(compute_projections(&track, 0.0).unwrap().is_empty());
    let projections = compute_projections(&track, 1000.0).unwrap();
    let five_years = projections.last().unwrap();
    assert_eq!(five_years.timeframe.months(), 60);
    assert!(five_years.total_return > 1000.0);
}
