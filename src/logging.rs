use std::fs::{File, OpenOptions};
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::Result;

/// Installs the global subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Logs go to stderr, or are appended to `log_file` when given. Keep the
/// returned guard alive until exit so buffered lines are flushed.
pub fn init_tracing(log_file: Option<&Path>) -> Result<WorkerGuard> {
    let (writer, guard) = match log_file {
        Some(path) => tracing_appender::non_blocking(open_log_file(path)?),
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let result = fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .try_init();
    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {}", e);
    }
    Ok(guard)
}

fn open_log_file(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
