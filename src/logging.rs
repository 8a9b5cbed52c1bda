use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV_VAR: &str = "WORDTRAINER_LOG";
const LOG_FILE_PREFIX: &str = "wordtrainer.log";

/// Keeps the background log writer alive; drop it only at exit.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// Filter directive: the environment variable wins over the configured level.
fn filter_for(config_level: &str) -> EnvFilter {
    resolve_filter(std::env::var(LOG_ENV_VAR).ok().as_deref(), config_level)
}

/// Falls back to `info` when neither directive parses.
fn resolve_filter(env_directive: Option<&str>, config_level: &str) -> EnvFilter {
    env_directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(config_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Logs go to a daily rolling file only, since the TUI owns stdout.
pub fn init_tracing(log_dir: &Path, config_level: &str) -> Option<FileLogGuard> {
    if let Err(err) = std::fs::create_dir_all(log_dir) {
        eprintln!("failed to create log directory {}: {err}", log_dir.display());
        return None;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let installed = tracing_subscriber::registry()
        .with(filter_for(config_level))
        .with(file_layer)
        .try_init();
    if installed.is_err() {
        return None;
    }

    Some(FileLogGuard { _guard: guard })
}
