//! Navigation and transport intents
//!
//! Every operation applies its position change to the model first and then
//! fires the matching engine or backend command without waiting on it. A
//! failed command is logged and dropped; the next engine state report is the
//! only correction mechanism.

use anyhow::Result;

use crate::audio::AudioBackend;
use crate::model::EnginePhase;

use super::AppController;

/// Seconds jumped by the relative seek keys.
pub const SEEK_STEP_SECONDS: f64 = 10.0;

impl AppController {
    pub async fn next_track(&self) {
        let model = self.model.lock().await;
        let sets = model.sets().await;
        let Some(step) = model.position().await.next_track(&sets) else {
            tracing::debug!("Already at the last track of the last set");
            return;
        };
        model.apply_nav_step(step).await;
        let phase = model.engine_phase().await;
        drop(model);

        if phase == EnginePhase::Uninitialized {
            return;
        }
        // Skipping implies playback resumes; the next state report confirms
        self.model.lock().await.set_playing(true).await;
        if step.scroll.is_some() {
            // Crossed into the next set: reload the engine with it
            self.play_from_position().await;
        } else {
            self.engine_command(|backend| backend.next(), "next track").await;
        }
    }

    pub async fn prev_track(&self) {
        let model = self.model.lock().await;
        let sets = model.sets().await;
        let Some(step) = model.position().await.prev_track(&sets) else {
            tracing::debug!("Already at the first track of the first set");
            return;
        };
        model.apply_nav_step(step).await;
        let phase = model.engine_phase().await;
        drop(model);

        if phase == EnginePhase::Uninitialized {
            return;
        }
        self.model.lock().await.set_playing(true).await;
        if step.scroll.is_some() {
            self.play_from_position().await;
        } else {
            self.engine_command(|backend| backend.previous(), "previous track").await;
        }
    }

    pub async fn next_set(&self) {
        let model = self.model.lock().await;
        let sets = model.sets().await;
        let Some(step) = model.position().await.next_set(&sets) else {
            tracing::debug!("Already at the last set");
            return;
        };
        model.apply_nav_step(step).await;
        let phase = model.engine_phase().await;
        if phase != EnginePhase::Uninitialized {
            model.set_playing(true).await;
            drop(model);
            self.play_from_position().await;
        }
    }

    pub async fn prev_set(&self) {
        let model = self.model.lock().await;
        let sets = model.sets().await;
        let Some(step) = model.position().await.prev_set(&sets) else {
            tracing::debug!("Already at the first set");
            return;
        };
        model.apply_nav_step(step).await;
        let phase = model.engine_phase().await;
        if phase != EnginePhase::Uninitialized {
            model.set_playing(true).await;
            drop(model);
            self.play_from_position().await;
        }
    }

    pub async fn toggle_play_pause(&self) {
        let model = self.model.lock().await;
        if model.engine_phase().await == EnginePhase::Uninitialized {
            tracing::debug!("Engine not ready, ignoring play/pause");
            return;
        }
        let is_playing = model.is_playing().await;
        model.set_playing(!is_playing).await;
        drop(model);

        // Optimistic flip; the next state report is authoritative
        self.engine_command(|backend| backend.toggle_play(), "play/pause").await;
    }

    /// Seek to an absolute position, clamped into `[0, duration]`.
    pub async fn seek(&self, time_seconds: f64) {
        let model = self.model.lock().await;
        let duration_ms = model.duration_ms().await;
        if duration_ms == 0 {
            return;
        }
        let target_ms = ((time_seconds.max(0.0)) * 1000.0).round() as u32;
        let clamped_ms = target_ms.min(duration_ms);
        model.assume_position(clamped_ms).await;
        let phase = model.engine_phase().await;
        drop(model);

        if phase != EnginePhase::Uninitialized {
            self.engine_command(|backend| backend.seek_ms(clamped_ms), "seek").await;
        }
    }

    pub async fn seek_relative(&self, delta_seconds: f64) {
        let progress_ms = {
            let model = self.model.lock().await;
            model.get_playback_info().await.progress_ms
        };
        self.seek(progress_ms as f64 / 1000.0 + delta_seconds).await;
    }

    /// Optimistically flip the like on the selected track and sync it to the
    /// backend in the background, reverting if the sync fails.
    pub async fn toggle_like_current(&self) {
        let model = self.model.lock().await;
        let Some(track) = model.current_track().await else {
            return;
        };
        let Some(new_liked) = model.apply_like_toggle(&track.id).await else {
            return;
        };
        let Some(client) = model.get_client().await else {
            return;
        };
        drop(model);

        let controller = self.clone();
        let track_id = track.id;
        tokio::spawn(async move {
            if let Err(e) = client.toggle_like(&track_id, new_liked).await {
                tracing::error!(%track_id, error = %e, "Like sync failed, reverting");
                let model = controller.model.lock().await;
                model.apply_like_toggle(&track_id).await;
            }
        });
    }

    pub async fn open_leaderboard(&self) {
        let model = self.model.lock().await;
        let Some(client) = model.get_client().await else {
            return;
        };
        drop(model);

        match client.fetch_leaderboard().await {
            Ok(entries) => {
                let model = self.model.lock().await;
                model.show_leaderboard(entries).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load leaderboard");
                let model = self.model.lock().await;
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    /// Load the selected set onto the engine once both the device and the
    /// sets are ready. `Uninitialized` -> `Primed`; called from the run loop
    /// until it fires.
    pub async fn prime_engine(&self) {
        let model = self.model.lock().await;
        if model.engine_phase().await != EnginePhase::Uninitialized {
            return;
        }
        if !model.has_sets().await {
            return;
        }
        let Some(client) = model.get_client().await else {
            return;
        };
        let Some(set) = model.selected_set().await else {
            return;
        };

        let device_id = {
            let backend = self.audio_backend.lock().await;
            match backend.as_ref() {
                Some(backend) => backend.device_id().to_string(),
                None => return,
            }
        };

        model.set_engine_phase(EnginePhase::Primed).await;
        drop(model);

        tracing::info!(set = %set.username, link = %set.link, "Priming engine with the first set");
        let uris: Vec<String> = set.tracks.iter().map(|t| t.uri.clone()).collect();
        tokio::spawn(async move {
            if let Err(e) = client.activate(&device_id).await {
                tracing::warn!(error = %e, "Device activation with backend failed");
            }
            if let Err(e) = client.play(&device_id, &uris).await {
                tracing::error!(error = %e, "Initial play command failed");
            }
        });
    }

    /// Ask the backend to play the selected set from the current track
    /// onward.
    pub(crate) async fn play_from_position(&self) {
        let model = self.model.lock().await;
        let Some(client) = model.get_client().await else {
            return;
        };
        let Some(set) = model.selected_set().await else {
            return;
        };
        let position = model.position().await;
        drop(model);

        let device_id = {
            let backend = self.audio_backend.lock().await;
            match backend.as_ref() {
                Some(backend) => backend.device_id().to_string(),
                None => {
                    tracing::debug!("Engine not connected, dropped play command");
                    return;
                }
            }
        };

        let uris: Vec<String> = set
            .tracks
            .iter()
            .skip(position.track_index)
            .map(|t| t.uri.clone())
            .collect();
        if uris.is_empty() {
            return;
        }

        tokio::spawn(async move {
            if let Err(e) = client.play(&device_id, &uris).await {
                tracing::error!(error = %e, "Play command failed");
            }
        });
    }

    /// Run a transport command against the engine, logging failures and
    /// moving on.
    async fn engine_command<F>(&self, op: F, what: &str)
    where
        F: FnOnce(&AudioBackend) -> Result<()>,
    {
        let backend = self.audio_backend.lock().await;
        match backend.as_ref() {
            Some(backend) => {
                if let Err(e) = op(backend) {
                    tracing::error!(error = %e, command = what, "Engine command failed");
                }
            }
            None => tracing::debug!(command = what, "Engine not connected, command dropped"),
        }
    }
}
