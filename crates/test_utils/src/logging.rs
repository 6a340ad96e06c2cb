//! Test Logging
//!
//! Installs a tracing subscriber once per test binary so `debug!` and
//! `warn!` output from the domain crates shows up with `RUST_LOG` set.

use once_cell::sync::Lazy;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Another harness may have installed a subscriber already
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer().with_target(true))
        .try_init();
});

/// Initializes test tracing; safe to call from every test
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
