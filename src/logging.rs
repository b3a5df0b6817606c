//! File-based logging for the session layer
//!
//! The hosting player usually owns the terminal, so logs go to rolling files.
//! Lines the engine emits through its own log callback are re-emitted under
//! the `engine` target and additionally copied, verbatim, to a separate file.

use std::path::Path;
use tracing::Metadata;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "spop";
const ENGINE_LOG_FILE_PREFIX: &str = "engine";
const ENGINE_TARGET: &str = "engine";
const DEFAULT_FILTER: &str = "spop=debug,engine=info,warn";

/// Initialize the logging system.
///
/// Session logs go to `.logs/spop.YYYY-MM-DD.log`, engine lines also to
/// `.logs/engine.YYYY-MM-DD.log`, both rotated daily. `RUST_LOG` overrides the
/// default filter `spop=debug,engine=info,warn`.
pub fn init_logging() -> anyhow::Result<()> {
    let log_dir = Path::new(LOG_DIR);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let session_file = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);
    let (session_writer, session_guard) = tracing_appender::non_blocking(session_file);
    let engine_file = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, ENGINE_LOG_FILE_PREFIX);
    let (engine_writer, engine_guard) = tracing_appender::non_blocking(engine_file);

    // The writers must outlive every session; the guards are never dropped.
    Box::leak(Box::new((session_guard, engine_guard)));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let session_layer = fmt::layer()
        .with_writer(session_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    // Engine lines already carry the engine's own timestamp and level.
    let engine_layer = fmt::layer()
        .with_writer(engine_writer)
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_filter(filter_fn(is_engine_line));

    tracing_subscriber::registry()
        .with(filter)
        .with(session_layer)
        .with(engine_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", LOG_DIR);
    Ok(())
}

fn is_engine_line(metadata: &Metadata<'_>) -> bool {
    metadata.target() == ENGINE_TARGET
}

/// Engine log lines end in a newline; everything from the last one is cut.
pub(crate) fn trim_engine_line(line: &str) -> &str {
    match line.rfind('\n') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

pub(crate) fn engine_message(line: &str) {
    tracing::info!(target: ENGINE_TARGET, "{}", trim_engine_line(line));
}

/// Log the outcome of an engine call that can fail
#[macro_export]
macro_rules! log_engine_result {
    ($operation:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::trace!(operation = $operation, "Engine call succeeded"),
            Err(e) => tracing::error!(operation = $operation, error = %e, "Engine call failed"),
        }
    };
}
