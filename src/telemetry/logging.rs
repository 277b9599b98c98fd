//! Logging configuration and initialization
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to whoever embeds it (the harness binary, or a host bridge).

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter directive variable, checked before `RUST_LOG`
pub const LOG_ENV: &str = "FXMASK_LOG";
/// Set to `json` for JSON console output
pub const LOG_FORMAT_ENV: &str = "FXMASK_LOG_FORMAT";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Write events to stderr (default: true)
    pub console_enabled: bool,
    /// Also write events to this file (default: none)
    pub file_path: Option<PathBuf>,
    /// Use JSON for console output (default: false)
    pub json_format: bool,
    /// Filter used when neither environment variable is set (default: "info")
    pub default_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_enabled: true,
            file_path: None,
            json_format: false,
            default_level: "info".to_string(),
        }
    }
}

/// Whether console output should be JSON, given the value of
/// [`LOG_FORMAT_ENV`] (if set)
fn use_json(env_value: Option<&str>, default: bool) -> bool {
    env_value.map_or(default, |v| v.eq_ignore_ascii_case("json"))
}

/// Install the global subscriber
///
/// The filter comes from `FXMASK_LOG`, then `RUST_LOG`, then
/// `config.default_level`. Keep the returned guard alive while logging to a
/// file; dropping it flushes and stops the writer thread.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(&config.default_level));

    let json = use_json(std::env::var(LOG_FORMAT_ENV).ok().as_deref(), config.json_format);

    let (file_layer, guard) = match &config.file_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::File::create(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let json_layer = (config.console_enabled && json).then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
    });
    let compact_layer = (config.console_enabled && !json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(json_layer)
        .with(compact_layer)
        .try_init()?;

    tracing::info!(
        target: "fx_mask",
        version = env!("CARGO_PKG_VERSION"),
        json_format = json,
        file = ?config.file_path,
        "Logging initialized"
    );

    Ok(guard)
}

pub use tracing_appender::non_blocking::WorkerGuard as LogGuard;
