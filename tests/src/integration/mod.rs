//! # Integration Flows
//!
//! - `block_filters`: server assembles per-block filters, client downloads,
//!   verifies against the header chain and scans for watched items
//! - `concurrency`: one filter shared across reader threads

pub mod block_filters;
pub mod concurrency;

/// Route `tracing` output through the test harness
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
