//! Tests for tracing initialization.

use std::sync::Mutex;

use sensus_core::tracing::init_tracing;

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn init_tracing_accepts_per_crate_filter() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("SENSUS_LOG", "sensus_storage=debug,sensus_cli=warn");
    init_tracing();
    std::env::remove_var("SENSUS_LOG");
}

#[test]
fn init_tracing_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    tracing::info!("still alive");
}
