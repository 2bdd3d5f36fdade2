//! Tracing subscriber setup.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::env_string;

/// Install the global subscriber.
///
/// Console logs go to stderr, leaving stdout to command output. When
/// `LOG_DIR` is set they are also written to a daily-rolling `<service>.log`
/// there; keep the returned guard alive so buffered file logs get flushed.
pub fn init_tracing(service: &str) -> Result<Option<WorkerGuard>> {
    // Default to info-level logs; override via RUST_LOG if needed.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let Some(log_dir) = env_string("LOG_DIR").map(PathBuf::from) else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;
        return Ok(None);
    };

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log dir {}", log_dir.display()))?;
    let appender = tracing_appender::rolling::daily(&log_dir, format!("{service}.log"));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer().with_ansi(false).with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    tracing::info!("writing logs to {}", log_dir.display());
    Ok(Some(guard))
}
