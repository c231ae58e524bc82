//! Logging setup.
//!
//! Two sinks share one `tracing` registry:
//! - one-line JSON written to a daily rolling file (always)
//! - human-readable colored output on stderr (debug builds only)
//!
//! Records emitted through the `log` crate are forwarded into `tracing`.
//! `RUST_LOG` overrides the configured level when set.

use log::LevelFilter;
use std::path::Path;
use std::sync::OnceLock;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "streakboard.log";

/// Initialize the global logger. Later calls are no-ops.
///
/// `level` is an `EnvFilter` directive such as `info` or `debug,sqlx=warn`.
pub fn init_logger(log_dir: &Path, level: &str) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)?;

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_appender = rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(guard);

    let json_layer = fmt::layer()
        .with_writer(non_blocking)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_timer(fmt::time::ChronoLocal::new(
            "%Y-%m-%dT%H:%M:%S%.3f%:z".to_string(),
        ))
        .with_filter(build_filter(level));

    let stdout_layer = if cfg!(debug_assertions) {
        Some(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                ))
                .with_writer(std::io::stderr)
                .with_filter(build_filter(level)),
        )
    } else {
        None
    };

    let subscriber = Registry::default().with(json_layer).with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "streakboard::logging",
        log_dir = %log_dir.display(),
        log_level = %level,
        version = env!("CARGO_PKG_VERSION"),
        profile = if cfg!(debug_assertions) { "Debug" } else { "Release" },
        "Logger initialized"
    );

    Ok(())
}

/// `RUST_LOG` first, then the configured directive, then plain `info`.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
