//! Logging init: human-readable records on stderr, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Without `RUST_LOG`, only warnings are
/// shown, or this crate's debug records when `verbose` is set.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "warn,image_fetcher=debug"
    } else {
        "warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
