//! Bangr backend API client
//!
//! All Spotify Web API access lives behind the backend; this client only
//! speaks the backend's JSON surface: the per-group sets, like bookkeeping,
//! the leaderboard, and player commands addressed to a Connect device.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::types::{LeaderboardEntry, Set};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct BangrClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    access_token: Arc<str>,
}

#[derive(Deserialize)]
struct SetsResponse {
    sets: Vec<Set>,
}

impl BangrClient {
    /// Build a client against `BANGR_API_URL` (or the local default),
    /// authenticating every call with the user's Spotify access token.
    pub fn new(access_token: String) -> Result<Self> {
        let base_url = std::env::var("BANGR_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        tracing::debug!(%base_url, "Bangr client initialized");
        Ok(Self {
            http,
            base_url: base_url.into(),
            access_token: access_token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the group's sets, ordered by the backend. Called once per
    /// session.
    pub async fn fetch_sets(&self) -> Result<Vec<Set>> {
        let response: SetsResponse = self
            .http
            .get(self.url("/sets"))
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("failed to decode sets response")?;

        tracing::info!(count = response.sets.len(), "Fetched sets");
        Ok(response.sets)
    }

    /// Flip the like flag for a track. The caller applies the change
    /// optimistically and reverts if this fails.
    pub async fn toggle_like(&self, track_id: &str, liked: bool) -> Result<()> {
        self.http
            .put(self.url(&format!("/tracks/{track_id}/like")))
            .query(&[("liked", liked)])
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(track_id, liked, "Like toggled");
        Ok(())
    }

    pub async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let entries: Vec<LeaderboardEntry> = self
            .http
            .get(self.url("/leaderboard"))
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("failed to decode leaderboard response")?;

        tracing::debug!(count = entries.len(), "Fetched leaderboard");
        Ok(entries)
    }

    /// Ask the backend to start playing the given track URIs on a device.
    pub async fn play(&self, device_id: &str, uris: &[String]) -> Result<()> {
        let uris_param = uris.join(",");
        self.http
            .get(self.url("/player"))
            .query(&[
                ("action", "play"),
                ("device_id", device_id),
                ("uris", uris_param.as_str()),
            ])
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(device_id, tracks = uris.len(), "Play command sent");
        Ok(())
    }

    /// Register a freshly connected device with the backend.
    pub async fn activate(&self, device_id: &str) -> Result<()> {
        self.http
            .get(self.url("/player"))
            .query(&[("action", "activate"), ("device_id", device_id)])
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?;

        tracing::info!(device_id, "Device activated with backend");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SetsResponse;

    #[test]
    fn decodes_the_backend_sets_payload() {
        let payload = r#"{
            "sets": [
                {
                    "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                    "link": "spotify:playlist:37i9dQZF1DXcBWIGoYBM5M",
                    "username": "vincent",
                    "profilePicURL": "https://i.scdn.co/image/abc",
                    "tracks": [
                        {
                            "id": "550e8400-e29b-41d4-a716-446655440000",
                            "uri": "spotify:track:4uLU6hMCjMI75M1A2tKUQC",
                            "name": "Never Gonna Give You Up",
                            "artist": "Rick Astley",
                            "liked": true,
                            "likes": 7,
                            "img_url": "https://i.scdn.co/image/def"
                        }
                    ]
                }
            ]
        }"#;

        let response: SetsResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.sets.len(), 1);

        let set = &response.sets[0];
        assert_eq!(set.username, "vincent");
        assert_eq!(set.profile_pic_url, "https://i.scdn.co/image/abc");

        let track = &set.tracks[0];
        assert_eq!(track.artist, "Rick Astley");
        assert!(track.liked);
        assert_eq!(track.likes, 7);
    }
}
