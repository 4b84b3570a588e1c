//! Structured logging setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Initialise the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_directives`. Calling this more
/// than once is harmless; later calls are ignored.
pub fn init(default_directives: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives)),
        )
        .with_target(false)
        .try_init();
}
