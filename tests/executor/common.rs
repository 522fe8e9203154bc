//! Shared fixtures for executor integration tests

use ledgerstore::{CallerIdentity, Executor, MemoryLedger, StoreConfig};

pub fn executor() -> Executor {
    Executor::new(StoreConfig::default()).unwrap()
}

pub fn approver() -> CallerIdentity {
    CallerIdentity::new("approver1", "Org1MSP").with_attribute("role", "approver")
}

pub fn viewer() -> CallerIdentity {
    CallerIdentity::new("viewer1", "Org1MSP").with_attribute("role", "viewer")
}

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Ledger with the default seed records committed
pub fn seeded(executor: &Executor) -> MemoryLedger {
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    executor.invoke(&txn, "initLedger", &[]).unwrap();
    txn.commit().unwrap();
    ledger
}

pub fn json(payload: &[u8]) -> serde_json::Value {
    serde_json::from_slice(payload).unwrap()
}
