use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "movie-browser.log";

/// Default log directory under the platform data dir.
pub fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "themoviedb", "movie-browser")
        .map(|dirs| dirs.data_local_dir().join("logs"))
}

/// Install a file-backed subscriber. The terminal is owned by the TUI, so
/// nothing is written to stdout/stderr. Keep the guard alive until exit.
pub fn init_tracing(log_dir: &Path) -> std::io::Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper_util=warn,reqwest=warn"));

    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_ansi(false)
        .with_writer(non_blocking_file);

    // try_init so a second call (or a test harness subscriber) is not fatal
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    Ok(guard)
}
