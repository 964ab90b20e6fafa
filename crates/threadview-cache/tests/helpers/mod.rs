//! Test helpers para threadview-cache.

#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod stores;

pub use fixtures::{FixtureRenderer, FixtureSource, cache_over, open_thread};
pub use stores::FlakyStore;

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}
