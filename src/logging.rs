//! Logging configuration using the tracing framework
//!
//! Logs can be controlled via the RUST_LOG environment variable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "skillstack=info,warn";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize logging to stderr
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log level (e.g., "debug", "info", "warn", "error")
///   - Default: "skillstack=info,warn"
///   - Examples:
///     - `RUST_LOG=skillstack=debug` - Debug logs for this crate only
///     - `RUST_LOG=skillstack::activity=trace` - Widget recomputation traces
///
/// Output goes to stderr so `activity --format svg` can be piped cleanly.
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

/// Initialize logging to a daily rolling file only
///
/// Used by the dashboard, where anything written to the terminal would
/// corrupt the alternate screen. The file lives in the project data
/// directory under `logs/`, or the current directory as a fallback.
pub fn init_with_file(log_file_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let log_dir = if let Some(proj_dirs) =
        directories::ProjectDirs::from("com", "skillstack", "skillstack")
    {
        let log_path = proj_dirs.data_dir().join("logs");
        std::fs::create_dir_all(&log_path)?;
        log_path
    } else {
        std::env::current_dir()?
    };

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_file_name);

    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .try_init()?;

    Ok(())
}

/// Initialize logging for tests
///
/// Only errors are shown by default.
pub fn init_test() {
    tracing_subscriber::registry()
        .with(env_filter("error"))
        .with(fmt::layer().with_test_writer())
        .try_init()
        .ok(); // Ignore errors if already initialized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_is_repeatable() {
        init_test();
        init_test();
    }

    #[test]
    fn test_structured_logging() {
        init_test();

        tracing::debug!(days = 7, total = 3, "activity recomputed");
        tracing::warn!(url = "http://localhost:8000", "backend unreachable");
    }
}
