//! Logging system configuration and initialization
//!
//! Structured line-oriented logs (timestamp, level, message) go both to
//! stdout and to a file under `logs/`, with the level controlled through
//! `RUST_LOG`. The non-blocking file writer's guard has to outlive the
//! subscriber, so it is parked in a process-global.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use chrono::Utc;
use lazy_static::lazy_static;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

// Keeps the log file writer alive for the lifetime of the process.
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<tracing_appender::non_blocking::WorkerGuard>> =
        Mutex::new(Vec::new());
}

/// UTC timestamps in a fixed, grep-friendly format.
struct UtcTimeFormatter;

impl FormatTime for UtcTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Directory the log file is written to, next to the working directory.
pub fn log_directory() -> PathBuf {
    PathBuf::from("logs")
}

/// Initialize stdout + file logging. Defaults to `info` when `RUST_LOG` is
/// unset.
pub fn init_logging() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::never(&log_dir, "njuskalo-watch.log");
    let (file_writer, guard) = non_blocking(file_appender);
    LOG_GUARDS
        .lock()
        .expect("log guard store poisoned")
        .push(guard);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_timer(UtcTimeFormatter)
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_timer(UtcTimeFormatter)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    Ok(())
}
