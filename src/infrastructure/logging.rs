//! Logging system configuration and initialization
//!
//! This module provides the logging setup used by the binary and by
//! embedding applications:
//! - Console output on stderr (stdout is reserved for extraction records)
//! - Optional file output through a non-blocking appender
//! - Optional structured JSON file logs
//! - `RUST_LOG` overrides the configured level

#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use chrono::Utc;
use lazy_static::lazy_static;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{Subscriber, info};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Registry,
    Layer,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::LoggingConfig;

// Global guard to keep the log file writer alive
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<tracing_appender::non_blocking::WorkerGuard>> =
        Mutex::new(Vec::new());
}

/// UTC timestamps with millisecond precision
struct UtcTimeFormatter;

impl FormatTime for UtcTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"))
    }
}

/// Human-readable stderr layer, stackable on any subscriber
fn console_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_timer(UtcTimeFormatter)
        .with_target(false)
}

/// Directory that receives log files for `config`
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    if let Some(dir) = &config.log_dir {
        return dir.clone();
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Build the level filter. `RUST_LOG` wins over the configured level; noisy
/// HTML parser internals stay at warn unless trace is requested.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", config.level, e))?;

    if !config.level.to_lowercase().contains("trace") {
        for directive in ["html5ever=warn", "selectors=warn", "scraper=warn"] {
            filter = filter.add_directive(
                directive
                    .parse()
                    .map_err(|e| anyhow!("Invalid log directive '{}': {}", directive, e))?,
            );
        }
    }

    Ok(filter)
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_env_filter(config)?;
    let registry = Registry::default().with(env_filter);

    let init_result = match (config.file_output, config.console_output) {
        (true, console) => {
            let log_dir = get_log_directory(config);
            std::fs::create_dir_all(&log_dir)
                .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", log_dir, e))?;

            let file_appender = rolling::never(&log_dir, &config.file_name);
            let (file_writer, file_guard) = non_blocking(file_appender);

            // Store the guard globally to prevent it from being dropped
            LOG_GUARDS
                .lock()
                .map_err(|_| anyhow!("Log guard registry poisoned"))?
                .push(file_guard);

            match (config.json_format, console) {
                (true, true) => {
                    let file_layer = fmt::Layer::new()
                        .json()
                        .with_writer(file_writer)
                        .with_timer(UtcTimeFormatter)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_ansi(false);
                    registry.with(file_layer).with(console_layer()).try_init()
                }
                (true, false) => {
                    let file_layer = fmt::Layer::new()
                        .json()
                        .with_writer(file_writer)
                        .with_timer(UtcTimeFormatter)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_ansi(false);
                    registry.with(file_layer).try_init()
                }
                (false, true) => {
                    let file_layer = fmt::Layer::new()
                        .with_writer(file_writer)
                        .with_timer(UtcTimeFormatter)
                        .with_target(false)
                        .with_ansi(false);
                    registry.with(file_layer).with(console_layer()).try_init()
                }
                (false, false) => {
                    let file_layer = fmt::Layer::new()
                        .with_writer(file_writer)
                        .with_timer(UtcTimeFormatter)
                        .with_target(false)
                        .with_ansi(false);
                    registry.with(file_layer).try_init()
                }
            }
        }
        (false, true) => registry.with(console_layer()).try_init(),
        (false, false) => {
            return Err(anyhow!("No logging output configured"));
        }
    };

    init_result.map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    if config.file_output {
        info!("Log directory: {:?}", get_log_directory(config));
        info!("JSON format: {}", config.json_format);
    }

    Ok(())
}
