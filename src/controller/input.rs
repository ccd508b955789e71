//! Key event handling
//!
//! Bindings mirror the web player: Space toggles playback, the vertical
//! arrows step tracks, the horizontal arrows step sets.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::playback::SEEK_STEP_SECONDS;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // An open overlay takes the keyboard until it is dismissed
        if self.dismiss_overlays(key.code).await {
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q' | 'Q') => self.model.lock().await.set_should_quit(true).await,
            KeyCode::Char(' ') => self.toggle_play_pause().await,
            KeyCode::Up => self.prev_track().await,
            KeyCode::Down => self.next_track().await,
            KeyCode::Left => self.prev_set().await,
            KeyCode::Right => self.next_set().await,
            KeyCode::Char('[') => self.seek_relative(-SEEK_STEP_SECONDS).await,
            KeyCode::Char(']') => self.seek_relative(SEEK_STEP_SECONDS).await,
            KeyCode::Char('f' | 'F') => self.toggle_like_current().await,
            KeyCode::Char('l' | 'L') => self.open_leaderboard().await,
            KeyCode::Char('h' | 'H') => self.model.lock().await.show_help_popup().await,
            _ => {}
        }
        Ok(())
    }

    /// Returns true when an overlay consumed the key.
    async fn dismiss_overlays(&self, code: KeyCode) -> bool {
        let model = self.model.lock().await;
        if model.has_error().await {
            if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return true;
        }
        if model.is_help_popup_open().await {
            if matches!(code, KeyCode::Esc | KeyCode::Char('h' | 'H')) {
                model.hide_help_popup().await;
            }
            return true;
        }
        if model.is_leaderboard_open().await {
            if matches!(code, KeyCode::Esc | KeyCode::Char('l' | 'L')) {
                model.hide_leaderboard().await;
            }
            return true;
        }
        false
    }
}
