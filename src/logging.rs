//! Tracing setup for the `autolink` binary.
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`):
//! - `RUST_LOG=debug` - every link, skip, and scan step
//! - `RUST_LOG=autolinker_core::index=info` - scan summaries only

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
