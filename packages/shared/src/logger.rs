//! Logging setup utilities for Yubin binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for a binary.
///
/// Both the library crates (`yubin_server`, `yubin_client`, `yubin_shared`)
/// and the binary itself log at `default_log_level`. `tower_http` follows the
/// same level so request traces show up next to the relay logs.
pub fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    let binary = binary_name.replace('-', "_");
    format!(
        "yubin_server={level},yubin_client={level},yubin_shared={level},tower_http={level},{binary}={level}",
        level = default_log_level,
        binary = binary,
    )
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "yubin-server", "yubin-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use yubin_shared::logger::setup_logger;
///
/// setup_logger("yubin-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
