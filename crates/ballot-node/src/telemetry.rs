//! Telemetry and logging initialization.
//!
//! Structured logging with tracing, pretty or JSON, to stdout or a file.

use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

// Flushes the non-blocking file writer; must outlive the program's logging
static LOG_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> = Mutex::new(None);

/// Initialize logging from the `[logging]` section.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    match &config.file {
        Some(path) => init_telemetry_with_file(&config.level, config.json, path),
        None => init_telemetry(&config.level, config.json),
    }
}

fn env_filter(log_level: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(log_level)?),
    }
}

/// Initialize logging to stdout.
pub fn init_telemetry(log_level: &str, json_format: bool) -> anyhow::Result<()> {
    let filter = env_filter(log_level)?;

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .try_init()?;
    }

    Ok(())
}

/// Initialize logging appended to `log_file`.
pub fn init_telemetry_with_file(
    log_level: &str,
    json_format: bool,
    log_file: &Path,
) -> anyhow::Result<()> {
    let filter = env_filter(log_level)?;

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(non_blocking))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .try_init()?;
    }

    if let Ok(mut g) = LOG_GUARD.lock() {
        *g = Some(guard);
    }

    Ok(())
}
