//! Tracing subscriber setup: stdout, or a daily rolling file under `LOG_DIR`

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Log file prefix inside `LOG_DIR`
const LOG_FILE_PREFIX: &str = "review-server";

/// Initialize the logger (stdout, `info`)
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// `RUST_LOG` wins over `log_level` when set. Files roll daily when
/// `log_dir` exists; otherwise output goes to stdout.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},tower_http=info,sqlx=warn")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, LOG_FILE_PREFIX);
            if subscriber
                .with_ansi(false)
                .with_writer(file_appender)
                .try_init()
                .is_err()
            {
                eprintln!("Logger already initialized");
            }
            return;
        }
        eprintln!("LOG_DIR {dir} does not exist, logging to stdout");
    }

    if subscriber.try_init().is_err() {
        eprintln!("Logger already initialized");
    }
}
