use chrono::Local;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// With `print` set, logs go to stderr and no file is created. Otherwise a
/// timestamped log file is opened under `log_dir` and its path returned.
/// `RUST_LOG` wins over `level`; both default to `info`.
pub fn init_tracing(level: Option<&str>, log_dir: Option<PathBuf>, print: bool) -> Option<PathBuf> {
    let default_directive = level.unwrap_or("info").to_string();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    if print {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        return None;
    }

    let log_dir = log_dir.unwrap_or_else(|| PathBuf::from("."));
    let timestamp = Local::now().format("%Y-%m-%dT%H%M%S").to_string();
    let log_path = log_dir.join(format!("{}.log", timestamp));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
        .ok();

    if let Some(file) = file {
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        // The guard must outlive the process or buffered lines are lost.
        std::mem::forget(guard);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();
    }

    Some(log_path)
}
