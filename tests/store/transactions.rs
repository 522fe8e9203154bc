//! Transaction isolation and conflicts seen through the record store.

use std::sync::Arc;
use std::thread;

use ledgerstore_core::Error;
use ledgerstore_engine::RecordStore;
use ledgerstore_storage::MemoryLedger;

use crate::common::*;

fn with_car0(ledger: &MemoryLedger) {
    let registry = car_registry();
    let txn = ledger.begin(anyone());
    RecordStore::new(&txn, &registry)
        .create("car", "CAR0", car("Toyota", "Prius", "blue", "Tomoko"))
        .unwrap();
    txn.commit().unwrap();
}

#[test]
fn concurrent_owner_changes_first_committer_wins() {
    init_tracing();
    let ledger = MemoryLedger::new();
    with_car0(&ledger);
    let registry = car_registry();

    let a = ledger.begin(anyone());
    let b = ledger.begin(anyone());
    RecordStore::new(&a, &registry)
        .set_field("CAR0", "owner", "Dave")
        .unwrap();
    RecordStore::new(&b, &registry)
        .set_field("CAR0", "owner", "Ellen")
        .unwrap();

    a.commit().unwrap();
    let err = b.commit().unwrap_err();
    assert!(matches!(err, Error::Adapter { .. }));

    let txn = ledger.begin(anyone());
    let record = RecordStore::new(&txn, &registry)
        .read_record("CAR0")
        .unwrap()
        .unwrap();
    assert_eq!(record.get("owner"), Some("Dave"));
}

#[test]
fn creates_of_distinct_keys_do_not_conflict() {
    let ledger = MemoryLedger::new();
    let registry = car_registry();

    let a = ledger.begin(anyone());
    let b = ledger.begin(anyone());
    RecordStore::new(&a, &registry)
        .create("car", "CAR1", car("Ford", "Mustang", "red", "Brad"))
        .unwrap();
    RecordStore::new(&b, &registry)
        .create("car", "CAR2", car("Hyundai", "Tucson", "green", "Jin Soo"))
        .unwrap();
    a.commit().unwrap();
    b.commit().unwrap();
    assert_eq!(ledger.live_keys(), 4);
}

#[test]
fn rolled_back_create_leaves_no_index_entry() {
    let ledger = MemoryLedger::new();
    let registry = car_registry();

    let txn = ledger.begin(anyone());
    RecordStore::new(&txn, &registry)
        .create("car", "CAR1", car("Ford", "Mustang", "red", "Brad"))
        .unwrap();
    txn.rollback();

    let txn = ledger.begin(anyone());
    let store = RecordStore::new(&txn, &registry);
    assert_eq!(store.query_by_index("owner~key", "Brad").unwrap().count(), 0);
    assert_eq!(ledger.live_keys(), 0);
}

#[test]
fn parallel_creates_from_threads() {
    let ledger = Arc::new(MemoryLedger::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                let registry = car_registry();
                let txn = ledger.begin(anyone());
                RecordStore::new(&txn, &registry)
                    .create("car", &format!("CAR{}", i), car("m", "m", "c", "Shared"))
                    .unwrap();
                txn.commit().unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let registry = car_registry();
    let txn = ledger.begin(anyone());
    let store = RecordStore::new(&txn, &registry);
    assert_eq!(store.query_by_index("owner~key", "Shared").unwrap().count(), 8);
    assert_eq!(store.query_range("", "").unwrap().count(), 8);
    assert_eq!(ledger.committed(), 8);
}
