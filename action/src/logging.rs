//! Tracing setup for the action binary.
//!
//! Run logs are the product output of a CI step, so the default level is
//! `info` for this crate. CI annotations (`::warning::` and friends) are
//! emitted separately by `io::workflow`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `demarkx_action=info` if unset.
/// Output: stderr, compact format, no timestamps (the CI runner adds its own).
///
/// # Example
/// ```bash
/// RUST_LOG=demarkx_action=debug demarkx-action --dry-run true
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("demarkx_action=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false)
                .compact(),
        )
        .init();
}
