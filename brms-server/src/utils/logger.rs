//! Logging Infrastructure
//!
//! Structured logging setup for development and production:
//! - Pretty console output in development, JSON in production
//! - Optional daily rotating application log (`<log_dir>/brms.YYYY-MM-DD`)
//! - Old log files removed by [`cleanup_old_logs`], run as a periodic task

use anyhow::Context;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of the rotating application log
pub const LOG_FILE_PREFIX: &str = "brms";

/// Days of application logs kept on disk
pub const LOG_RETENTION_DAYS: i64 = 14;

/// Initialize console-only logging at `info`
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file("info", false, None)
}

/// Initialize the logging system
///
/// `RUST_LOG` wins over `level` when set.
///
/// ```no_run
/// // Development setup (console only)
/// brms_server::init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + file)
/// brms_server::init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            fs::create_dir_all(log_dir)
                .with_context(|| format!("failed to create log directory {}", dir))?;

            let app_log = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(app_log))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("global tracing subscriber already installed")?;

    Ok(())
}

/// Delete rotated application logs older than `keep_days` relative to `today`
///
/// Returns the number of files removed. Files that do not match
/// `brms.YYYY-MM-DD` are left alone.
pub fn cleanup_old_logs(log_dir: &Path, keep_days: i64, today: NaiveDate) -> anyhow::Result<usize> {
    let cutoff = today - chrono::Duration::days(keep_days);
    let mut removed = 0;

    if !log_dir.exists() {
        return Ok(0);
    }

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(date_part) = name
            .strip_prefix(LOG_FILE_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            && let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_old_logs() {
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        for name in [
            "brms.2024-06-29",
            "brms.2024-06-16",
            "brms.2024-06-01",
            "brms.2023-12-31",
            "other.2020-01-01",
            "brms.not-a-date",
        ] {
            fs::write(dir.path().join(name), b"{}").unwrap();
        }

        let removed = cleanup_old_logs(dir.path(), LOG_RETENTION_DAYS, today).unwrap();
        assert_eq!(removed, 2);

        assert!(dir.path().join("brms.2024-06-29").exists());
        assert!(dir.path().join("brms.2024-06-16").exists());
        assert!(!dir.path().join("brms.2024-06-01").exists());
        assert!(dir.path().join("other.2020-01-01").exists());
        assert!(dir.path().join("brms.not-a-date").exists());
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(cleanup_old_logs(&missing, 14, today).unwrap(), 0);
    }
}
