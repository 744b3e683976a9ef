use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding per-module log directives
pub const LOG_ENV: &str = "LANGSTRIP_LOG";

/// Install the stderr subscriber
///
/// Reads directives from `LANGSTRIP_LOG` (e.g. `langstrip=debug`); falls back
/// to `langstrip=info`, or `langstrip=debug` when `verbose` is set. Safe to
/// call more than once.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose { "langstrip=debug" } else { "langstrip=info" };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .with(filter)
            .init();
    });
}
