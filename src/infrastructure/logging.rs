use std::io;

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{config::LoggingConfig, infrastructure::directories};

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the global subscriber. The returned guard flushes the log file when dropped,
/// so `main` holds it until the process exits.
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let mut guard = None;
    INIT.get_or_try_init::<_, anyhow::Error>(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let console_layer = fmt::layer()
            .with_writer(io::stdout)
            .with_target(true)
            .with_ansi(false);

        let file_layer = match &config.logs_dir {
            Some(dir) => {
                let logs_dir = directories::ensure_dir(dir)?;
                let file_appender = tracing_appender::rolling::daily(&logs_dir, "cert-check.log");
                let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
                guard = Some(file_guard);
                Some(
                    fmt::layer()
                        .with_writer(file_writer)
                        .with_target(true)
                        .with_ansi(false),
                )
            }
            None => None,
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        tracing::debug!(logs = ?config.logs_dir, "tracing initialized");
        Ok(())
    })?;
    Ok(guard)
}
