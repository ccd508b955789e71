//! Local playback engine backed by librespot
//!
//! The process shows up as a Spotify Connect device; the Bangr backend
//! targets it with play commands while transport controls go straight to the
//! device. Playback state flows back through the player event channel.

use std::sync::Arc;

use anyhow::Result;
use librespot::connect::{ConnectConfig, Spirc};
use librespot::core::config::SessionConfig;
use librespot::core::session::Session;
use librespot::playback::config::{AudioFormat, Bitrate, PlayerConfig};
use librespot::playback::mixer::{MixerConfig, NoOpVolume};
use librespot::playback::player::{Player, PlayerEventChannel};
use librespot::playback::{audio_backend, mixer};

use crate::auth::AuthResult;

const DEVICE_NAME: &str = "Bangr";

pub struct AudioBackend {
    player: Arc<Player>,
    spirc: Spirc,
    device_id: String,
}

impl AudioBackend {
    pub async fn new(auth: AuthResult) -> Result<Self> {
        let device_id = Self::make_device_id();
        tracing::info!(%device_id, "Connecting playback engine");

        let session = Session::new(
            SessionConfig {
                device_id: device_id.clone(),
                ..Default::default()
            },
            Some(auth.cache),
        );

        let sink = audio_backend::find(None)
            .ok_or_else(|| anyhow::anyhow!("no audio backend available"))?;
        let mixer_builder = mixer::find(None)
            .ok_or_else(|| anyhow::anyhow!("no mixer available"))?;
        let mixer = mixer_builder(MixerConfig::default())?;

        let audio_format = AudioFormat::default();
        let player = Player::new(
            PlayerConfig {
                bitrate: Bitrate::Bitrate320,
                ..Default::default()
            },
            session.clone(),
            Box::new(NoOpVolume),
            move || sink(None, audio_format),
        );

        let connect_config = ConnectConfig {
            name: DEVICE_NAME.to_string(),
            ..Default::default()
        };
        let (spirc, spirc_task) = Spirc::new(
            connect_config,
            session,
            auth.librespot_credentials,
            player.clone(),
            mixer,
        )
        .await?;

        spirc.activate()?;

        tokio::spawn(async move {
            let _spirc_task_res = spirc_task.await;
        });

        tracing::info!(device_name = DEVICE_NAME, "Playback engine connected");

        Ok(Self {
            player,
            spirc,
            device_id,
        })
    }

    fn make_device_id() -> String {
        // Consistent per machine so the backend sees the same device across
        // restarts
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        format!("{}-{}", DEVICE_NAME, hostname)
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn player_event_channel(&self) -> PlayerEventChannel {
        self.player.get_player_event_channel()
    }

    pub fn toggle_play(&self) -> Result<()> {
        self.spirc.play_pause()?;
        Ok(())
    }

    pub fn next(&self) -> Result<()> {
        self.spirc.next()?;
        Ok(())
    }

    pub fn previous(&self) -> Result<()> {
        self.spirc.prev()?;
        Ok(())
    }

    pub fn seek_ms(&self, position_ms: u32) -> Result<()> {
        self.spirc.set_position_ms(position_ms)?;
        Ok(())
    }

    pub fn shutdown(&self) {
        let _ = self.spirc.shutdown();
    }
}
