use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber for the service.
/// - Respects `RUST_LOG` if set, otherwise info-level with HTTP layers visible
/// - Compact single-line format, written to stdout
/// - `try_init` so repeated calls (tests, embedded use) stay harmless
pub fn init_logging_default() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(|| io::stdout())
        .try_init();
}
