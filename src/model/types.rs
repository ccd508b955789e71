//! Core type definitions for the application

use std::time::Instant;
use serde::Deserialize;

use super::navigation::ScrollDirection;

/// A single playable track inside a set, as served by the Bangr backend.
#[derive(Clone, Debug, Deserialize)]
pub struct Track {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artist: String,
    pub liked: bool,
    pub likes: i64,
    #[serde(default)]
    pub img_url: String,
}

/// One group member's curated set of tracks.
#[derive(Clone, Debug, Deserialize)]
pub struct Set {
    pub id: String,
    #[serde(default)]
    pub link: String,
    pub tracks: Vec<Track>,
    pub username: String,
    #[serde(default, rename = "profilePicURL")]
    pub profile_pic_url: String,
}

/// A row of the group leaderboard.
#[derive(Clone, Debug, Deserialize)]
pub struct LeaderboardEntry {
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub likes: i64,
}

/// Lifecycle of the playback engine between process start and the first
/// state report.
///
/// Transport commands are only issued once the engine is at least `Primed`;
/// navigation intents before that still move the local position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EnginePhase {
    /// Local device not connected yet.
    #[default]
    Uninitialized,
    /// Device connected and loaded with the selected set.
    Primed,
    /// At least one state-changed notification has arrived.
    Active,
}

/// UI state for the application
#[derive(Clone, Default)]
pub struct UiState {
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    /// Set when the carousel selection moves; the view flashes the matching
    /// arrow until the marker expires.
    pub scroll_flash: Option<(ScrollDirection, Instant)>,
    pub show_help_popup: bool,
    pub show_leaderboard: bool,
    pub leaderboard: Vec<LeaderboardEntry>,
}
