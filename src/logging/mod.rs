//! Diagnostic logging to disk.
//!
//! The terminal belongs to the UI, so `tracing` output goes to a daily
//! rolling file `nbmenu.log.<date>` under the configured log directory
//! (default: `~/.local/share/nbmenu/logs/`). Disabled logging installs no
//! subscriber at all.

use crate::config::{expand_home, LoggingConfig};
use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "nbmenu.log";

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the program so buffered lines are flushed on exit.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    if !config.enabled {
        return Ok(None);
    }

    let log_dir = expand_home(&config.log_dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = filter_for(config);
    // Another subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    tracing::info!(dir = %log_dir.display(), "logging initialised");
    Ok(Some(guard))
}

/// `RUST_LOG` wins over the configured level.
fn filter_for(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}
