use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Initialize logging to stderr, plus a daily-rolling file when `logging.file` is set.
///
/// `RUST_LOG` takes precedence over `logging.level`. The returned guard must be
/// held for as long as file logs should be flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match config.file.as_deref() {
        Some(file) => {
            let (dir, name) = split_log_path(file);
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(file) = config.file.as_deref() {
        tracing::debug!("File logging enabled at {}", file);
    }

    Ok(guard)
}

/// Run `f` with a stderr-only subscriber.
///
/// For work that logs before `init_logging` can run, such as loading the config
/// that tells it where to log. Filtered by `RUST_LOG`, `info` otherwise.
pub fn with_bootstrap_logging<T>(f: impl FnOnce() -> T) -> T {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));
    tracing::subscriber::with_default(subscriber, f)
}

/// Split `logs/url-culture.log` into (`logs`, `url-culture.log`)
fn split_log_path(file: &str) -> (&Path, &str) {
    let path = Path::new(file);
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("url-culture.log");
    (dir, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        assert_eq!(split_log_path("logs/url-culture.log"), (Path::new("logs"), "url-culture.log"));
        assert_eq!(split_log_path("culture.log"), (Path::new("."), "culture.log"));
    }

    #[test]
    fn test_bootstrap_logging_has_subscriber() {
        let enabled = with_bootstrap_logging(|| {
            tracing::info!("logged before init_logging");
            tracing::enabled!(tracing::Level::ERROR)
        });
        assert!(enabled);
    }
}
