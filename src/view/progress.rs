//! Bottom transport bar: now playing, progress gauge, key hints

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use super::utils::format_duration;
use crate::model::PlaybackInfo;

const KEY_HINTS: &str = " Space play/pause | ↑↓ track | ←→ set | [ ] seek | F like ";

pub fn render_progress_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let track = &playback.track;
    let now_playing = if track.uri.is_empty() {
        " Nothing playing yet ".to_string()
    } else {
        let marker = if playback.is_playing { "▶" } else { "⏸" };
        format!(" {marker} {} | {} ", track.name, track.artist)
    };

    let elapsed = format!(
        "{} / {}",
        format_duration(playback.progress_ms),
        format_duration(playback.duration_ms)
    );

    let ratio = match playback.duration_ms {
        0 => 0.0,
        d => (playback.progress_ms as f64 / d as f64).clamp(0.0, 1.0),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(now_playing)
                .title_bottom(Line::from(KEY_HINTS).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(ratio)
        .label(elapsed);

    frame.render_widget(gauge, area);
}
