//! View module
//!
//! Pure rendering over model snapshots; nothing here mutates state.
//!
//! - `utils`: formatting helpers
//! - `layout`: header bar
//! - `carousel`: the three-slot set carousel
//! - `progress`: bottom transport bar
//! - `overlays`: modal overlays (error, leaderboard, help)

mod carousel;
mod layout;
mod overlays;
mod progress;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{NavPosition, PlaybackInfo, Set, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        playback: &PlaybackInfo,
        ui_state: &UiState,
        sets: &[Set],
        position: NavPosition,
    ) {
        let [header, body, transport] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .areas(frame.area());

        layout::render_header(frame, header, ui_state, sets, position);

        let playing_uri = (!playback.track.uri.is_empty()).then_some(playback.track.uri.as_str());
        carousel::render_carousel(frame, body, sets, position, playing_uri, playback.is_playing);

        progress::render_progress_bar(frame, transport, playback);

        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }
        if ui_state.show_leaderboard {
            overlays::render_leaderboard(frame, ui_state);
        }
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
