//! Logger initialization.
//!
//! Logs go to stderr so response output on stdout stays clean.

use std::io::Write;

use colored::*;
use log::LevelFilter;
use serde::Serialize;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// One line of `--log-format json` output.
#[derive(Debug, Serialize)]
struct JsonLogLine<'a> {
    ts: i64,
    level: &'a str,
    target: &'a str,
    msg: String,
}

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then overrides the global filter, so
/// `RUST_LOG=rustls=trace` still works for per-module tracing.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// http_client https://example.com --log-level debug
/// RUST_LOG=rustls=debug http_client https://example.com --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("rustls", LevelFilter::Warn.min(level));
    builder.filter_module("http_client", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = JsonLogLine {
                    ts: chrono::Utc::now().timestamp_millis(),
                    level: record.level().as_str(),
                    target: record.target(),
                    msg: record.args().to_string(),
                };
                let json = serde_json::to_string(&line).unwrap_or_else(|_| "{}".into());
                writeln!(buf, "{json}")
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init: tests may initialize more than once per process
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
