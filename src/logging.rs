//! Logging setup and helpers for logging requests to the remote store.

use std::{fs::OpenOptions, path::Path, sync::Arc};

use hyper::{Method, StatusCode};
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Request and response bodies longer than this many characters are truncated
/// in `info` level logs. The full body is logged at the `debug` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Install the global tracing subscriber.
///
/// Logs are written to stderr, filtered by the `RUST_LOG` environment variable
/// (`info` when unset). If `log_file` is given, everything at `debug` level and
/// above is also appended to that file.
///
/// # Errors
/// Returns an error if `log_file` cannot be opened for appending.
///
/// # Panics
/// Panics if a global subscriber has already been installed.
pub fn setup_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let debug_log = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .init();

    Ok(())
}

/// Log a request that is about to be sent to the remote store.
pub fn log_request(method: &Method, uri: &str, body: &str) {
    match truncate(body, LOG_BODY_LENGTH_LIMIT) {
        Some(truncated) => {
            tracing::info!("Sending request: {method} {uri}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Sending request: {method} {uri}\nbody: {body:?}"),
    }
}

/// Log a response received from the remote store.
pub fn log_response(method: &Method, uri: &str, status: StatusCode, body: &str) {
    match truncate(body, LOG_BODY_LENGTH_LIMIT) {
        Some(truncated) => {
            tracing::info!("Received response for {method} {uri}: {status}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Received response for {method} {uri}: {status}\nbody: {body:?}"),
    }
}

/// The first `limit` characters of `text`, or `None` if `text` is not longer than `limit`.
fn truncate(text: &str, limit: usize) -> Option<&str> {
    text.char_indices()
        .nth(limit)
        .map(|(byte_index, _)| &text[..byte_index])
}
