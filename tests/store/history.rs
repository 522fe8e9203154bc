//! Key history across committed transactions.

use ledgerstore_core::{HistoryEntry, JsonCodec, LedgerAdapter, RecordCodec};
use ledgerstore_engine::RecordStore;
use ledgerstore_storage::MemoryLedger;

use crate::common::*;

#[test]
fn history_lists_each_committed_version_in_order() {
    init_tracing();
    let ledger = MemoryLedger::new();
    let registry = car_registry();

    let txn = ledger.begin(anyone());
    let first_tx = txn.tx_id().to_string();
    RecordStore::new(&txn, &registry)
        .create("car", "CAR0", car("Toyota", "Prius", "blue", "Tomoko"))
        .unwrap();
    txn.commit().unwrap();

    let txn = ledger.begin(anyone());
    let second_tx = txn.tx_id().to_string();
    RecordStore::new(&txn, &registry)
        .set_field("CAR0", "owner", "Dave")
        .unwrap()
        .unwrap();
    txn.commit().unwrap();

    let txn = ledger.begin(anyone());
    let entries: Vec<HistoryEntry> = RecordStore::new(&txn, &registry)
        .history("CAR0")
        .unwrap()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].tx_id, first_tx);
    assert_eq!(entries[1].tx_id, second_tx);
    assert!(entries[0].timestamp < entries[1].timestamp);
    assert!(entries.iter().all(|e| !e.is_delete));

    let latest = JsonCodec.decode(entries[1].value.as_deref().unwrap()).unwrap();
    assert_eq!(latest["owner"], "Dave");
}

#[test]
fn history_records_tombstones() {
    let ledger = MemoryLedger::new();
    let registry = car_registry();

    let txn = ledger.begin(anyone());
    RecordStore::new(&txn, &registry)
        .create("car", "CAR0", car("Toyota", "Prius", "blue", "Tomoko"))
        .unwrap();
    txn.commit().unwrap();

    let txn = ledger.begin(anyone());
    txn.del_state("CAR0").unwrap();
    txn.commit().unwrap();

    let txn = ledger.begin(anyone());
    let store = RecordStore::new(&txn, &registry);
    let entries: Vec<HistoryEntry> = store.history("CAR0").unwrap().map(|r| r.unwrap()).collect();
    assert_eq!(entries.len(), 2);
    assert!(entries[1].is_delete);
    assert!(entries[1].value.is_none());
    assert!(store.read("CAR0").unwrap().is_empty());
}

#[test]
fn history_of_unknown_key_is_empty() {
    let ledger = MemoryLedger::new();
    let registry = car_registry();
    let txn = ledger.begin(anyone());
    assert_eq!(RecordStore::new(&txn, &registry).history("CAR7").unwrap().count(), 0);
}

#[test]
fn history_excludes_uncommitted_writes() {
    let ledger = MemoryLedger::new();
    let registry = car_registry();
    let txn = ledger.begin(anyone());
    let store = RecordStore::new(&txn, &registry);
    store
        .create("car", "CAR0", car("Toyota", "Prius", "blue", "Tomoko"))
        .unwrap();
    assert_eq!(store.history("CAR0").unwrap().count(), 0);
}
