//! Logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for CLI use.
///
/// The filter honors `RUST_LOG`; without it, `verbose` selects debug-level
/// output for the dragnet crates and `quiet` drops everything below warn.
pub fn init(verbose: bool, quiet: bool) {
    let default = if quiet {
        "dragnet=warn"
    } else if verbose {
        "dragnet=debug"
    } else {
        "dragnet=info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();
}
