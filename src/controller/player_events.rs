//! Playback engine event listener
//!
//! The engine reports what is audible on its own schedule; nothing orders
//! these notifications against commands we just issued. Position and pause
//! state are mirrored directly, and a reported track outside the selected
//! set moves the carousel one set forward (see `NavPosition::reconcile`).

use librespot::metadata::audio::{AudioItem, UniqueFields};
use librespot::playback::player::{PlayerEvent, PlayerEventChannel};

use super::AppController;
use crate::model::{EnginePhase, NowPlaying};

impl AppController {
    pub fn start_player_event_listener(&self, mut events: PlayerEventChannel) {
        let controller = self.clone();
        tracing::info!("Listening for playback engine events");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if controller.model.lock().await.should_quit().await {
                    tracing::debug!("Event listener shutting down");
                    break;
                }
                controller.handle_player_event(event).await;
            }
        });
    }

    async fn handle_player_event(&self, event: PlayerEvent) {
        let model = self.model.lock().await;
        match event {
            PlayerEvent::Playing { position_ms, .. } => {
                model.update_playback_position(position_ms, true).await;
            }
            PlayerEvent::Paused { position_ms, .. }
            | PlayerEvent::Loading { position_ms, .. } => {
                model.update_playback_position(position_ms, false).await;
            }
            PlayerEvent::Seeked { position_ms, .. }
            | PlayerEvent::PositionChanged { position_ms, .. } => {
                let is_playing = model.is_playing().await;
                model.update_playback_position(position_ms, is_playing).await;
            }
            PlayerEvent::Stopped { .. } => {
                model.update_playback_position(0, false).await;
            }
            PlayerEvent::EndOfTrack { .. } => {
                model.set_playing(false).await;
            }
            PlayerEvent::TrackChanged { audio_item } => {
                drop(model);
                self.on_track_changed(&audio_item).await;
            }
            _ => tracing::trace!("Unhandled player event"),
        }
    }

    /// Mirror the report into the now-playing snapshot, then let the
    /// navigation core decide whether the engine ran past the selected set.
    async fn on_track_changed(&self, item: &AudioItem) {
        let uri = item.track_id.to_uri().unwrap_or_default();
        let artist = primary_artist(&item.unique_fields);
        tracing::info!(track = %item.name, artist = %artist, uri = %uri, "Engine changed track");

        let model = self.model.lock().await;
        if model.engine_phase().await == EnginePhase::Primed {
            model.set_engine_phase(EnginePhase::Active).await;
        }

        model
            .update_now_playing(NowPlaying {
                name: item.name.clone(),
                artist,
                uri: uri.clone(),
                duration_ms: item.duration_ms,
            })
            .await;

        let sets = model.sets().await;
        let position = model.position().await;
        if let Some(step) = position.reconcile(&uri, &sets) {
            tracing::info!(
                uri = %uri,
                set_index = step.position.set_index,
                "Reported track is outside the selected set, advancing carousel"
            );
            model.apply_nav_step(step).await;
        }
    }
}

fn primary_artist(fields: &UniqueFields) -> String {
    match fields {
        UniqueFields::Track { artists, .. } => {
            artists.0.first().map(|a| a.name.clone()).unwrap_or_default()
        }
        UniqueFields::Episode { show_name, .. } => show_name.clone(),
        UniqueFields::Local { artists, .. } => artists.clone().unwrap_or_default(),
    }
}
