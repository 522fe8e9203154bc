//! Common test utilities for record store tests

use ledgerstore_core::{fields, CallerIdentity, Fields, Limits, RecordKind};
use ledgerstore_engine::KindRegistry;

/// Install a test-friendly tracing subscriber once per process
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

/// Registry with the `car` kind indexed on `owner`
pub fn car_registry() -> KindRegistry {
    let car = RecordKind::new("car", ["make", "model", "color", "owner"]).with_index("owner");
    KindRegistry::from_kinds([car], Limits::default()).unwrap()
}

/// Car fields in declaration order
pub fn car(make: &str, model: &str, color: &str, owner: &str) -> Fields {
    fields([
        ("make", make),
        ("model", model),
        ("color", color),
        ("owner", owner),
    ])
}

/// Caller with no attributes
pub fn anyone() -> CallerIdentity {
    CallerIdentity::new("user1", "Org1MSP")
}
