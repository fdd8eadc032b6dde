use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(level: &str) -> String {
    format!("propplan={level},propplan_core=warn")
}

/// Initialize logging to stderr, or to `log_file` when one is given.
///
/// File output goes through a non-blocking appender; the returned guard must
/// be held until the program exits or buffered lines are lost. The level can
/// be controlled via the `level` parameter or the `RUST_LOG` environment
/// variable.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let Some(log_path) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()?;
        return Ok(None);
    };

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)?;
    let file_name = log_path
        .file_name()
        .ok_or_else(|| color_eyre::eyre::eyre!("log path has no file name: {}", log_path.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()?;

    tracing::info!(log_path = %log_path.display(), "propplan logging initialized");
    Ok(Some(guard))
}
