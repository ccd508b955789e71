//! Controller module
//!
//! Turns user intents into model mutations plus engine/backend commands,
//! and keeps the carousel position consistent with engine state reports.
//!
//! - `input`: key event handling
//! - `playback`: navigation and transport intents
//! - `player_events`: playback engine event listener

mod input;
mod playback;
mod player_events;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::audio::AudioBackend;
use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) audio_backend: Arc<Mutex<Option<AudioBackend>>>,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        audio_backend: Arc<Mutex<Option<AudioBackend>>>,
    ) -> Self {
        Self { model, audio_backend }
    }

    /// Map common backend failures to something readable in the error
    /// banner.
    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let text = error.to_string();
        for (needle, friendly) in [
            ("401", "Session expired. Please restart the app."),
            ("404", "Playback device not found. Give it a moment and try again."),
            ("429", "Rate limited. Please wait a moment."),
            ("error sending request", "Can't reach the Bangr backend."),
        ] {
            if text.contains(needle) {
                return friendly.to_string();
            }
        }
        format!("Error: {text}")
    }
}
