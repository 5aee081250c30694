use tracing::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Initializes stderr logging, filtered by `RUST_LOG` (defaults to `warn`).
pub fn init() {
    let filt = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_sub = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(filt);

    tracing_subscriber::registry().with(stderr_sub).init();

    debug!("logging started");
}
