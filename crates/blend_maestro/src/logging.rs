//! Tracing setup shared by every `blend` command.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `BLEND_LOG=blend_croquis=debug`.
pub const LOG_ENV: &str = "BLEND_LOG";

/// Install the global subscriber once.
///
/// Output always goes to stderr: stdout carries JSON-RPC responses in
/// server mode and generated code otherwise.
pub fn init_logging(debug: bool) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let fallback = if debug { "debug" } else { "warn" };
        let filter = match std::env::var(LOG_ENV) {
            Ok(directives) if !debug && !directives.trim().is_empty() => {
                EnvFilter::new(directives)
            }
            _ => EnvFilter::new(fallback),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();
    });
}
