//! Logging Infrastructure
//!
//! stderr output always; a daily-rolling file when a log directory is set.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Filter precedence: explicit level, then `RUST_LOG`, then the build default
fn env_filter(log_level: Option<&str>) -> EnvFilter {
    if let Some(level) = log_level {
        return EnvFilter::new(level);
    }
    if let Ok(from_env) = EnvFilter::try_from_default_env() {
        from_env
    } else if cfg!(debug_assertions) {
        EnvFilter::new("info,catalog_manager=debug,catalog_client=debug")
    } else {
        EnvFilter::new("warn,catalog_manager=info")
    }
}

/// Install the global subscriber
///
/// Keep the returned guard alive for the life of the process, otherwise
/// buffered file output is lost.
pub fn init_logger(
    log_level: Option<&str>,
    log_dir: Option<&Path>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = rolling::daily(dir, "catalog.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_timer(LocalTimer)
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .with_writer(non_blocking_file);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    if let Some(dir) = log_dir {
        tracing::info!(path = %dir.display(), "File logging enabled");
    }
    Ok(guard)
}
