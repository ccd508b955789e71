mod audio;
mod auth;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use audio::AudioBackend;
use controller::AppController;
use model::{AppModel, BangrClient};
use view::AppView;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: failed to initialize logging: {e}");
            None
        }
    };

    tracing::info!("=== Bangr Client Starting ===");

    // Sign in with the user's Spotify account; the backend client reuses
    // the same token
    let auth = auth::perform_oauth_flow().await?;
    tracing::debug!(expires_at = %auth.expires_at, "Access token obtained");
    let client = BangrClient::new(auth.access_token.clone())?;

    let mut app_model = AppModel::new();
    app_model.set_client(client.clone());

    // One fetch per session; a failure just leaves the carousel empty
    match client.fetch_sets().await {
        Ok(sets) if sets.is_empty() => tracing::warn!("Backend returned no sets"),
        Ok(sets) => app_model.set_sets(sets).await,
        Err(e) => tracing::error!(error = %e, "Failed to fetch sets, showing empty state"),
    }

    let model = Arc::new(Mutex::new(app_model));
    let audio_backend: Arc<Mutex<Option<AudioBackend>>> = Arc::new(Mutex::new(None));
    let controller = AppController::new(model.clone(), audio_backend.clone());

    spawn_engine_init(auth, model.clone(), audio_backend.clone(), controller.clone());

    tracing::info!("Starting TUI...");
    let mut terminal = setup_terminal()?;
    let run_result = run_app(&mut terminal, model, controller).await;

    // Drop the Connect device before giving the terminal back
    if let Some(backend) = audio_backend.lock().await.as_ref() {
        backend.shutdown();
    }
    restore_terminal(&mut terminal)?;

    if let Err(e) = run_result {
        tracing::error!(error = ?e, "Application error");
    }
    tracing::info!("Bangr client shutting down");
    Ok(())
}

/// Connect the playback engine off the render loop; `prime_engine` in the
/// run loop picks it up once the device appears.
fn spawn_engine_init(
    auth: auth::AuthResult,
    model: Arc<Mutex<AppModel>>,
    slot: Arc<Mutex<Option<AudioBackend>>>,
    controller: AppController,
) {
    tokio::spawn(async move {
        match AudioBackend::new(auth).await {
            Ok(backend) => {
                let events = backend.player_event_channel();
                *slot.lock().await = Some(backend);
                controller.start_player_event_listener(events);
            }
            Err(e) => {
                tracing::error!(error = %e, "Playback engine init failed");
                let model = model.lock().await;
                model.set_error(format!("Audio init failed: {e}")).await;
            }
        }
    });
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // No-op once the engine has been primed
        controller.prime_engine().await;

        let (playback, ui_state, sets, position, should_quit) = {
            let model_guard = model.lock().await;
            model_guard.auto_clear_transient_ui().await;
            (
                model_guard.get_playback_info().await,
                model_guard.get_ui_state().await,
                model_guard.sets().await,
                model_guard.position().await,
                model_guard.should_quit().await,
            )
        };
        if should_quit {
            return Ok(());
        }

        terminal.draw(|f| AppView::render(f, &playback, &ui_state, &sets, position))?;

        // Short poll keeps the progress gauge moving between engine reports
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let _ = controller.handle_key_event(key).await;
            }
        }
    }
}
