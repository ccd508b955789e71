//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::bangr_client::BangrClient;
use super::navigation::{NavPosition, NavStep};
use super::playback::{NowPlaying, PlaybackInfo, PlaybackTiming};
use super::types::{EnginePhase, LeaderboardEntry, Set, Track, UiState};

const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(5);
const SCROLL_FLASH_DURATION: Duration = Duration::from_millis(700);

/// Main application model containing all state
///
/// The model is the only owner of mutable state: controllers mutate it
/// through these methods, the view reads cloned snapshots.
pub struct AppModel {
    pub client: Option<BangrClient>,
    sets: Arc<Mutex<Vec<Set>>>,
    position: Arc<Mutex<NavPosition>>,
    now_playing: Arc<Mutex<NowPlaying>>,
    timing: Arc<Mutex<PlaybackTiming>>,
    engine_phase: Arc<Mutex<EnginePhase>>,
    pub ui_state: Arc<Mutex<UiState>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            client: None,
            sets: Arc::new(Mutex::new(Vec::new())),
            position: Arc::new(Mutex::new(NavPosition::default())),
            now_playing: Arc::new(Mutex::new(NowPlaying::default())),
            timing: Arc::new(Mutex::new(PlaybackTiming::default())),
            engine_phase: Arc::new(Mutex::new(EnginePhase::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_client(&mut self, client: BangrClient) {
        self.client = Some(client);
    }

    pub async fn get_client(&self) -> Option<BangrClient> {
        self.client.clone()
    }

    // ========================================================================
    // Sets & navigation position
    // ========================================================================

    pub async fn set_sets(&self, sets: Vec<Set>) {
        *self.sets.lock().await = sets;
        *self.position.lock().await = NavPosition::default();
    }

    pub async fn sets(&self) -> Vec<Set> {
        self.sets.lock().await.clone()
    }

    pub async fn has_sets(&self) -> bool {
        !self.sets.lock().await.is_empty()
    }

    pub async fn position(&self) -> NavPosition {
        *self.position.lock().await
    }

    /// Move the position and record the carousel motion for the view.
    pub async fn apply_nav_step(&self, step: NavStep) {
        *self.position.lock().await = step.position;
        if let Some(direction) = step.scroll {
            let mut state = self.ui_state.lock().await;
            state.scroll_flash = Some((direction, Instant::now()));
        }
    }

    pub async fn selected_set(&self) -> Option<Set> {
        let position = *self.position.lock().await;
        self.sets.lock().await.get(position.set_index).cloned()
    }

    pub async fn current_track(&self) -> Option<Track> {
        let position = *self.position.lock().await;
        self.sets
            .lock()
            .await
            .get(position.set_index)
            .and_then(|s| s.tracks.get(position.track_index))
            .cloned()
    }

    /// Optimistically flip a track's like flag and count everywhere it
    /// appears, returning the new flag. Calling it again reverts.
    pub async fn apply_like_toggle(&self, track_id: &str) -> Option<bool> {
        let mut sets = self.sets.lock().await;
        let mut new_liked = None;
        for set in sets.iter_mut() {
            for track in set.tracks.iter_mut().filter(|t| t.id == track_id) {
                track.liked = !track.liked;
                track.likes += if track.liked { 1 } else { -1 };
                new_liked = Some(track.liked);
            }
        }
        new_liked
    }

    // ========================================================================
    // Playback state
    // ========================================================================

    pub async fn update_now_playing(&self, playing: NowPlaying) {
        let duration_ms = playing.duration_ms;
        *self.now_playing.lock().await = playing;

        let mut timing = self.timing.lock().await;
        timing.duration_ms = duration_ms;
    }

    pub async fn update_playback_position(&self, position_ms: u32, is_playing: bool) {
        let mut timing = self.timing.lock().await;
        timing.update_position(position_ms, is_playing);
    }

    pub async fn set_playing(&self, is_playing: bool) {
        let mut timing = self.timing.lock().await;
        timing.position_ms = timing.current_position_ms();
        timing.is_playing = is_playing;
        timing.last_update = Instant::now();
    }

    /// Assume a just-issued seek landed; the next engine report overrides.
    pub async fn assume_position(&self, position_ms: u32) {
        let mut timing = self.timing.lock().await;
        timing.position_ms = position_ms.min(timing.duration_ms);
        timing.last_update = Instant::now();
    }

    pub async fn is_playing(&self) -> bool {
        self.timing.lock().await.is_playing
    }

    pub async fn duration_ms(&self) -> u32 {
        self.timing.lock().await.duration_ms
    }

    pub async fn get_playback_info(&self) -> PlaybackInfo {
        let track = self.now_playing.lock().await.clone();
        let timing = self.timing.lock().await;

        PlaybackInfo {
            track,
            progress_ms: timing.current_position_ms(),
            duration_ms: timing.duration_ms,
            is_playing: timing.is_playing,
        }
    }

    pub async fn engine_phase(&self) -> EnginePhase {
        *self.engine_phase.lock().await
    }

    pub async fn set_engine_phase(&self, phase: EnginePhase) {
        *self.engine_phase.lock().await = phase;
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    /// Expire the error banner and the carousel flash marker.
    pub async fn auto_clear_transient_ui(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(ts) = state.error_timestamp {
            if ts.elapsed() >= ERROR_DISPLAY_DURATION {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
        if let Some((_, ts)) = state.scroll_flash {
            if ts.elapsed() >= SCROLL_FLASH_DURATION {
                state.scroll_flash = None;
            }
        }
    }

    pub async fn show_leaderboard(&self, entries: Vec<LeaderboardEntry>) {
        let mut state = self.ui_state.lock().await;
        state.leaderboard = entries;
        state.show_leaderboard = true;
    }

    pub async fn hide_leaderboard(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_leaderboard = false;
    }

    pub async fn is_leaderboard_open(&self) -> bool {
        self.ui_state.lock().await.show_leaderboard
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::navigation::ScrollDirection;

    fn sample_sets() -> Vec<Set> {
        let track = |id: &str, liked: bool| Track {
            id: id.to_string(),
            uri: format!("spotify:track:{id}"),
            name: id.to_uppercase(),
            artist: "Artist".to_string(),
            liked,
            likes: 3,
            img_url: String::new(),
        };
        vec![Set {
            id: "s0".to_string(),
            link: String::new(),
            tracks: vec![track("a", false), track("b", true)],
            username: "ana".to_string(),
            profile_pic_url: String::new(),
        }]
    }

    #[tokio::test]
    async fn like_toggle_applies_and_reverts() {
        let model = AppModel::new();
        model.set_sets(sample_sets()).await;

        assert_eq!(model.apply_like_toggle("a").await, Some(true));
        let track = &model.sets().await[0].tracks[0];
        assert!(track.liked);
        assert_eq!(track.likes, 4);

        assert_eq!(model.apply_like_toggle("a").await, Some(false));
        let track = &model.sets().await[0].tracks[0];
        assert!(!track.liked);
        assert_eq!(track.likes, 3);

        assert_eq!(model.apply_like_toggle("missing").await, None);
    }

    #[tokio::test]
    async fn nav_step_moves_position_and_flashes_scroll() {
        let model = AppModel::new();
        model.set_sets(sample_sets()).await;

        model
            .apply_nav_step(NavStep {
                position: NavPosition::new(0, 1),
                scroll: Some(ScrollDirection::Forward),
            })
            .await;

        assert_eq!(model.position().await, NavPosition::new(0, 1));
        assert_eq!(model.current_track().await.unwrap().id, "b");
        let state = model.get_ui_state().await;
        assert!(matches!(
            state.scroll_flash,
            Some((ScrollDirection::Forward, _))
        ));
    }

    #[tokio::test]
    async fn assumed_seek_position_is_clamped_to_duration() {
        let model = AppModel::new();
        model
            .update_now_playing(NowPlaying {
                duration_ms: 10_000,
                ..NowPlaying::default()
            })
            .await;

        model.assume_position(25_000).await;
        assert_eq!(model.get_playback_info().await.progress_ms, 10_000);
    }
}
