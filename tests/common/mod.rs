#![allow(dead_code)]

//! Shared helpers for integration tests.

use std::sync::Once;

static INIT: Once = Once::new();

/// Route `tracing` output through the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Worker error carrying the item that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerError(pub usize);

impl std::fmt::Display for WorkerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "worker failed on item {}", self.0)
    }
}

impl std::error::Error for WorkerError {}
