use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_DIR_ENV: &str = "CLASSMAP_LOG_DIR";

/// Directory for log files: `$CLASSMAP_LOG_DIR` if set, otherwise
/// `~/.classmap/logs`.
pub fn log_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(LOG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".classmap")
        .join("logs")
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "info,classmap_core=trace,classmap_cli=debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber: a daily-rolling `<component>.log` file and
/// optionally stderr. `RUST_LOG` overrides the level chosen by `verbose`.
///
/// Keep the returned guard alive until exit or buffered lines are lost. A
/// second call leaves the first subscriber in place.
pub fn init_logging(component: &str, to_stderr: bool, verbose: bool) -> WorkerGuard {
    let log_dir = log_dir();
    let _ = std::fs::create_dir_all(&log_dir);

    // cli.log.2024-01-21
    let file_appender = tracing_appender::rolling::daily(&log_dir, format!("{component}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    let _ = if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).try_init()
    } else {
        registry.try_init()
    };

    guard
}
