use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log to stderr. Defaults to INFO, override with `RUST_LOG`.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(false),
        )
        .try_init()?;

    Ok(())
}

/// Log to `verikit-YYYY-MM-DD-HH-MM-SS.log` under `dir`, or under the
/// platform's local data directory when `dir` is `None`.
///
/// Returns the log file path and the guard that flushes the writer; keep
/// the guard alive for as long as logs should be written.
pub fn init_file_logging(dir: Option<PathBuf>) -> Result<(PathBuf, WorkerGuard)> {
    // Resolve logs directory
    let logs_dir = match dir {
        Some(dir) => dir,
        None => dirs::data_local_dir()
            .ok_or(anyhow::anyhow!("Could not find local data directory"))?
            .join("verikit")
            .join("logs"),
    };

    // Create logs directory
    std::fs::create_dir_all(&logs_dir)?;

    // Create timestamped log file name
    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_filename = format!("verikit-{}.log", timestamp);
    let log_path = logs_dir.join(&log_filename);

    // Create file appender (non-blocking)
    let file_appender = tracing_appender::rolling::never(&logs_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Set up formatting layer for file output
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI codes in log file
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // Set up filter (default to INFO, can be overridden with RUST_LOG env var)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Initialize subscriber
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    // Caller keeps the guard alive; dropping it flushes and stops the writer
    Ok((log_path, guard))
}
