//! Diagnostic logging to stderr.
//!
//! The library only emits `tracing` events; nothing is shown until a binary
//! calls [`init_logging`]. `POCKETBOOK_LOG` takes the usual `EnvFilter`
//! directives and wins over the verbosity flag.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "POCKETBOOK_LOG";

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "pocketbook=debug"
    } else {
        "warn"
    }
}

pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
