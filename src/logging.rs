use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file prefix used by the headless host
pub const DEFAULT_LOG_PREFIX: &str = "layer-namer";

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleFormat {
    /// No console output, file only
    #[default]
    Off,
    /// Human-readable, colored
    Pretty,
    /// One JSON object per line
    Json,
}

/// Filter from `RUST_LOG` when set, otherwise `debug` or `info`.
fn build_filter(debug_mode: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug_mode {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

fn ensure_log_dir(log_dir: &str) -> Result<()> {
    let log_path = Utf8PathBuf::from(log_dir);
    if !log_path.exists() {
        fs::create_dir_all(&log_path)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(())
}

/// Setup logging with a daily rotating file appender.
///
/// # Arguments
/// * `log_dir` - Directory for log files (e.g., "logs")
/// * `log_prefix` - Prefix for log files (e.g., "layer-namer")
/// * `debug_mode` - If true, use debug level; otherwise use info level
///
/// # Returns
/// A guard that must be held for the duration of the program to keep logging active
pub fn setup_logging(log_dir: &str, log_prefix: &str, debug_mode: bool) -> Result<WorkerGuard> {
    setup_logging_with_console(log_dir, log_prefix, debug_mode, ConsoleFormat::Off)
}

/// Setup file logging plus optional console output.
///
/// # Errors
/// Fails if the log directory cannot be created or a global subscriber is
/// already installed.
pub fn setup_logging_with_console(
    log_dir: &str,
    log_prefix: &str,
    debug_mode: bool,
    console: ConsoleFormat,
) -> Result<WorkerGuard> {
    ensure_log_dir(log_dir)?;

    let file_appender = rolling::daily(log_dir, log_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let registry = tracing_subscriber::registry()
        .with(build_filter(debug_mode))
        .with(file_layer);

    // Console goes to stderr; stdout carries panel events in the headless host
    match console {
        ConsoleFormat::Off => registry.try_init(),
        ConsoleFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(false),
            )
            .try_init(),
        ConsoleFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            )
            .try_init(),
    }
    .context("Failed to install tracing subscriber")?;

    tracing::info!(
        "Logging initialized: dir={}, prefix={}, debug={}, console={:?}",
        log_dir,
        log_prefix,
        debug_mode,
        console
    );

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_setup_logging_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");
        let log_dir_str = log_dir.to_str().unwrap();

        // A second global subscriber in the same test binary is rejected,
        // but the directory is created either way
        let _ = setup_logging(log_dir_str, "test", false);

        assert!(log_dir.exists());
    }

    #[test]
    fn test_default_console_format_is_off() {
        assert_eq!(ConsoleFormat::default(), ConsoleFormat::Off);
    }
}
