//! Tests for tracing setup.

use std::sync::Mutex;

use fixmark_core::tracing::init_tracing;

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

/// TRC-01: Per-module filters are accepted.
#[test]
fn test_module_filter_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("FIXMARK_LOG", "fixmark_analysis=debug,fixmark_core=warn");
    init_tracing();
    std::env::remove_var("FIXMARK_LOG");
}

/// TRC-02: Repeated initialization does not panic.
#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!(target: "fixmark", "still alive");
}
