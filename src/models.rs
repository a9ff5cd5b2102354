// Data models
use serde::{Deserialize, Serialize};

pub type TrackId = String;

/// Historical streaming assumptions used by the projection engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamingHistory {
    pub average_streams_per_month: f64,
    pub revenue_per_stream: f64,
    /// Fractional monthly growth, 0.15 = 15%
    pub growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub audio_url: Option<String>,
    pub duration_ms: Option<i64>,

    // Funding terms
    pub funding_goal: f64,
    pub current_funding: f64,
    pub total_shares: u64,
    pub available_shares: u64,
    pub minimum_investment: f64,
    /// Percentage, only used by the simple calculator
    pub expected_roi: f64,

    pub streaming: StreamingHistory,
}

impl Track {
    /// Track with display fields only, funding terms left at zero
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    None,
    One,
    All,
}
