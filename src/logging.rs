//! Logging setup for applications built on review-prep.
//!
//! The library itself only emits `tracing` events. Whoever composes the
//! pipeline calls [`init`] once at startup with a [`LoggingConfig`]; nothing in
//! the library installs a subscriber on its own.
//!
//! ## Outputs
//!
//! - **Console**: always on, pretty-printed.
//! - **Files** (when `file_logging` is set): `review-prep.<date>.log` with every
//!   event and `error.<date>.log` with warnings and errors, both rotated daily
//!   with the last 10 files kept.
//!
//! ```no_run
//! use review_prep::{config::LoggingConfig, logging};
//!
//! logging::init(&LoggingConfig::default()).expect("Failed to initialize logging");
//! tracing::info!("pipeline started");
//! ```

use crate::config::LoggingConfig;
use crate::error::{PrepError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Directory log files are written to.
///
/// Uses `log_dir` from the config when set, otherwise the platform data
/// directory:
/// - Windows: `%APPDATA%/review-prep/logs`
/// - macOS: `~/Library/Application Support/review-prep/logs`
/// - Linux: `~/.local/share/review-prep/logs`
///
/// # Errors
///
/// Returns an error if no data directory is known or it cannot be created.
pub fn get_log_dir(config: &LoggingConfig) -> Result<PathBuf> {
    let log_dir = match &config.log_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_dir()
            .ok_or_else(|| PrepError::Config("Failed to determine data directory".to_owned()))?
            .join("review-prep")
            .join("logs"),
    };

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)?;
    }

    Ok(log_dir)
}

fn rolling_appender(log_dir: &Path, prefix: &str) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| PrepError::Config(format!("Failed to create {prefix} log appender: {e}")))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the level directive is invalid, the log directory cannot
/// be prepared, or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| PrepError::Config(format!("Invalid log level '{}': {e}", config.level)))?;

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(config.ansi)
        .pretty();

    let (file_layers, log_dir) = if config.file_logging {
        let log_dir = get_log_dir(config)?;

        let all_logs_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(rolling_appender(&log_dir, "review-prep")?);

        let error_logs_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(rolling_appender(&log_dir, "error")?)
            .with_filter(EnvFilter::new("warn"));

        (Some(all_logs_layer.and_then(error_logs_layer)), Some(log_dir))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layers)
        .try_init()
        .map_err(|e| PrepError::Config(format!("Logging already initialized: {e}")))?;

    match log_dir {
        Some(dir) => tracing::info!("Logging initialized, log directory: {}", dir.display()),
        None => tracing::debug!("Logging initialized (console only)"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_dir_uses_configured_dir() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let config = LoggingConfig {
            log_dir: Some(tmp.path().join("logs")),
            ..LoggingConfig::default()
        };

        let dir = get_log_dir(&config)?;
        assert!(dir.ends_with("logs"));
        assert!(dir.is_dir(), "log dir should be created");
        Ok(())
    }

    #[test]
    fn test_init_rejects_bad_level() {
        // Only meaningful when RUST_LOG does not already supply a filter.
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "review_prep=loudest".to_owned(),
            ..LoggingConfig::default()
        };
        assert!(matches!(init(&config), Err(PrepError::Config(_))));
    }
}
