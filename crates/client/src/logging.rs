//! Tracing setup: a per-session log file, optionally mirrored to stderr.
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Per-session log directory under the platform cache dir.
pub fn session_log_dir(session_id: &str) -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "sage-trail")
        .context("could not determine a home directory for logs")?;
    Ok(dirs.cache_dir().join("logs").join(session_id))
}

pub fn setup_logging(session_id: &str, stderr: bool) -> Result<PathBuf> {
    let log_dir = session_log_dir(session_id)?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "client.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
    let stderr_layer = stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    // Keep the writer alive for the whole process.
    std::mem::forget(guard);
    Ok(log_dir)
}
