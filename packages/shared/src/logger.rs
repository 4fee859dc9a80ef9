//! Logging setup utilities for the Tegaki binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The default filter enables `crate_name`, this shared crate and `tower_http`
/// (HTTP request traces) at `default_log_level`. The filter can be overridden
/// using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The crate name of the binary (usually `env!("CARGO_CRATE_NAME")`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use tegaki_shared::logger::setup_logger;
///
/// setup_logger("tegaki_server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(crate_name: &str, level: &str) -> String {
    format!(
        "{}={},{}={},tower_http={}",
        crate_name.replace('-', "_"),
        level,
        env!("CARGO_PKG_NAME").replace('-', "_"),
        level,
        level
    )
}
