//! Spotify sign-in
//!
//! Browser OAuth on first run, silent refresh-token reuse afterwards. The
//! same access token drives both the local playback engine and the Bangr
//! backend, which validates it against Spotify.

use std::fs;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use librespot::core::{authentication::Credentials, cache::Cache};
use librespot_oauth::{OAuthClient, OAuthClientBuilder};

const CLIENT_ID: &str = "9f3c1adbe60c4ed5a38a4f2bbd1cf0d4";
const REDIRECT_URI: &str = "http://127.0.0.1:8898/login";
const SCOPES: &[&str] = &[
    "streaming",
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "playlist-read-private",
];

const LOGIN_DONE_PAGE: &str = r#"
<!doctype html>
<html>
<head><title>Success</title></head>
<body><h1>Authentication Successful!</h1><script>window.close();</script></body>
</html>
"#;

const CACHE_DIR: &str = ".cache";
const CACHE_FILES_DIR: &str = ".cache/files";
const REFRESH_TOKEN_FILE: &str = ".cache/refresh_token";

/// Everything the rest of the app needs after sign-in: credentials for the
/// local playback engine and the bearer token the Bangr backend expects.
#[derive(Clone)]
pub struct AuthResult {
    pub librespot_credentials: Credentials,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub cache: Cache,
}

fn oauth_client(interactive: bool) -> Result<OAuthClient> {
    let mut builder = OAuthClientBuilder::new(CLIENT_ID, REDIRECT_URI, SCOPES.to_vec());
    if interactive {
        builder = builder
            .open_in_browser()
            .with_custom_message(LOGIN_DONE_PAGE);
    }
    builder.build().context("failed to build OAuth client")
}

async fn login_via_browser() -> Result<(Credentials, String)> {
    tracing::info!("Opening browser for Spotify sign-in");
    let token = oauth_client(true)?.get_access_token_async().await?;

    if let Err(e) = fs::write(REFRESH_TOKEN_FILE, &token.refresh_token) {
        tracing::warn!(error = %e, "Could not persist refresh token");
    }

    let credentials = Credentials::with_access_token(token.access_token.clone());
    tracing::info!("Browser sign-in completed");
    Ok((credentials, token.access_token))
}

/// Try to resume the previous session without opening a browser. Any
/// failure here just falls back to the interactive flow.
async fn refresh_cached_session(cache: &Cache) -> Option<(Credentials, String)> {
    let credentials = cache.credentials()?;
    let refresh_token = fs::read_to_string(REFRESH_TOKEN_FILE).ok()?;
    tracing::info!("Found cached credentials and refresh token");

    let client = match oauth_client(false) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "OAuth client setup failed");
            return None;
        }
    };

    match client.refresh_token_async(&refresh_token).await {
        Ok(token) => {
            let _ = fs::write(REFRESH_TOKEN_FILE, &token.refresh_token);
            tracing::debug!("Access token refreshed");
            Some((credentials, token.access_token))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Cached refresh token rejected, re-authenticating");
            None
        }
    }
}

pub async fn perform_oauth_flow() -> Result<AuthResult> {
    let cache = Cache::new(Some(CACHE_DIR), Some(CACHE_DIR), Some(CACHE_FILES_DIR), None)?;

    let (librespot_credentials, access_token) = match refresh_cached_session(&cache).await {
        Some(session) => session,
        None => login_via_browser().await?,
    };

    Ok(AuthResult {
        librespot_credentials,
        access_token,
        expires_at: Utc::now() + chrono::Duration::seconds(3600),
        cache,
    })
}
