// Recording transport for unit tests
use anyhow::{bail, Result};
use parking_lot::Mutex;
use std::sync::Arc;

use super::transport::AudioTransport;
use crate::models::Track;

/// Records every call as `"<kind>[:<arg>]"` and fails the kind in `fail_on`
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingTransport {
    calls: Arc<Mutex<Vec<String>>>,
    fail_on: Arc<Mutex<Option<&'static str>>>,
}

impl RecordingTransport {
    pub(crate) fn failing(kind: &'static str) -> Self {
        Self {
            fail_on: Arc::new(Mutex::new(Some(kind))),
            ..Self::default()
        }
    }

    /// Shared by clones, so a test can break a transport the player owns
    pub(crate) fn set_fail_on(&self, kind: Option<&'static str>) {
        *self.fail_on.lock() = kind;
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, kind: &'static str, call: String) -> Result<()> {
        self.calls.lock().push(call);
        if *self.fail_on.lock() == Some(kind) {
            bail!("device unavailable");
        }
        Ok(())
    }
}

impl AudioTransport for RecordingTransport {
    async fn load(&mut self, track: &Track) -> Result<()> {
        self.record("load", format!("load:{}", track.id))
    }

    async fn play(&mut self) -> Result<()> {
        self.record("play", "play".to_string())
    }

    async fn pause(&mut self) -> Result<()> {
        self.record("pause", "pause".to_string())
    }

    async fn stop(&mut self) -> Result<()> {
        self.record("stop", "stop".to_string())
    }

    async fn seek_to(&mut self, position_ms: u64) -> Result<()> {
        self.record("seek", format!("seek:{position_ms}"))
    }

    async fn set_volume(&mut self, level: f32) -> Result<()> {
        self.record("volume", format!("volume:{level}"))
    }

    async fn cleanup(&mut self) -> Result<()> {
        self.record("cleanup", "cleanup".to_string())
    }
}
