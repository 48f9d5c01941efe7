use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming a log file; when unset, logs go to stderr.
pub const LOG_FILE_ENV: &str = "BENCHWORKER_LOG";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget {
    Stderr,
    /// Unique per-process path: `{path}.{timestamp}.{pid}`
    File(String),
}

impl LogTarget {
    fn from_env_value(value: Option<String>) -> Self {
        let Some(log_path) = value.filter(|path| !path.trim().is_empty()) else {
            return LogTarget::Stderr;
        };

        let pid = std::process::id();
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        LogTarget::File(format!("{}.{}.{}", log_path, timestamp, pid))
    }
}

/// Initialize tracing.
///
/// stdout carries the message stream, so logs never go there. Set
/// `BENCHWORKER_LOG` to a file path to log to a file instead of stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match LogTarget::from_env_value(std::env::var(LOG_FILE_ENV).ok()) {
        LogTarget::Stderr => {
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_timer(fmt::time::UtcTime::rfc_3339());
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init();
        }
        LogTarget::File(path) => {
            let Ok(file) = std::fs::File::create(&path) else {
                eprintln!("Warning: Failed to create log file: {}", path);
                return;
            };

            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_level(true);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .try_init();
        }
    }
}
