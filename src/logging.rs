//! Logging setup: always to a file, additionally to stderr when asked.
//!
//! Filter priority:
//!
//! 1. **`TEXT_VIEWER_LOG`** - viewer-specific control
//! 2. **`RUST_LOG`** - standard tracing variable
//! 3. **Default** - `warn` globally, `info` for this crate
//!
//! The stderr layer is enabled when either variable is set, or in debug
//! builds (release builds run without a console window).
//!
//! Log file: `<data_local_dir>/text-viewer/logs/text-viewer-<pid>.log`.

use std::{env, path::PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::error::Result;

const ENV_VAR: &str = "TEXT_VIEWER_LOG";
const DEFAULT_DIRECTIVES: &str = "warn,text_viewer=info";

/// Must be held for the lifetime of the program; dropping it flushes and
/// stops the background file writer.
pub(crate) struct LogGuard {
    _file_guard: WorkerGuard,
    pub(crate) log_file: PathBuf,
}

/// Install the global subscriber.
pub(crate) fn init() -> Result<LogGuard> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let filename = format!("text-viewer-{}.log", std::process::id());

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(filter());

    let stderr_enabled =
        env::var_os(ENV_VAR).is_some() || env::var_os("RUST_LOG").is_some() || cfg!(debug_assertions);
    let stderr_layer = stderr_enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter())
    });

    // A second init (already installed) is harmless; keep the first one.
    let _ = Registry::default()
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("text-viewer")
        .join("logs")
}

/// Build the filter from the first usable source.  Invalid directives in an
/// environment variable fall through to the next source.
fn filter() -> EnvFilter {
    [ENV_VAR, "RUST_LOG"]
        .into_iter()
        .filter_map(|var| env::var(var).ok())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVES).is_ok());
    }

    #[test]
    fn log_dir_is_namespaced() {
        let dir = log_dir();
        assert!(dir.ends_with(PathBuf::from("text-viewer").join("logs")));
    }
}
