//! File logging for the TUI
//!
//! ratatui owns the terminal, so log output goes to daily-rotating files
//! under `.logs/` instead of stdout. `RUST_LOG` overrides the defaults.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_DIR: &str = ".logs";
const DEFAULT_DIRECTIVES: &str = "bangr_rs=debug,librespot=info,warn";

/// Set up logging to `.logs/bangr-rs.YYYY-MM-DD.log`.
///
/// The returned guard flushes the non-blocking writer on drop and must be
/// held for the lifetime of the process.
pub fn init_logging() -> Result<WorkerGuard> {
    std::fs::create_dir_all(LOG_DIR)?;

    let appender = rolling::daily(LOG_DIR, "bangr-rs");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(dir = LOG_DIR, "Logging initialized");
    Ok(guard)
}
