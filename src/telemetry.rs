//! Tracing subscriber setup.
//!
//! The CLI logs colored output to stderr and JSON to a daily rolling file.
//! Lambda handlers log JSON to stdout, where CloudWatch picks it up.

use anyhow::Result;
use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_LOG_FILE: &str = "logs/bls_pipeline.log";

fn filter(var: &str, default: &str) -> Result<EnvFilter> {
    Ok(EnvFilter::from_env(var).add_directive(default.parse()?))
}

/// Installs the CLI subscriber. Keep the returned guard alive until exit so
/// buffered file output is flushed.
pub fn init_cli() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bls_pipeline.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(filter("RUST_LOG", "info")?);

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(filter("RUST_LOG_JSON", "debug")?);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()?;

    Ok(guard)
}

/// Installs the Lambda subscriber: JSON lines on stdout, no ANSI.
pub fn init_lambda() -> Result<()> {
    let layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(std::io::stdout)
        .with_filter(filter("RUST_LOG", "info")?);

    tracing_subscriber::registry().with(layer).try_init()?;
    Ok(())
}
