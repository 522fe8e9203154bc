//! The CAR0 scenario end to end on the record store.

use ledgerstore_core::{JsonCodec, KeyValue, Record, RecordCodec};
use ledgerstore_engine::RecordStore;
use ledgerstore_storage::MemoryLedger;

use crate::common::*;

#[test]
fn car0_scenario() {
    init_tracing();
    let ledger = MemoryLedger::new();
    let registry = car_registry();

    let txn = ledger.begin(anyone());
    let store = RecordStore::new(&txn, &registry);
    store
        .create("car", "CAR0", car("Toyota", "Prius", "blue", "Tomoko"))
        .unwrap();
    txn.commit().unwrap();

    let txn = ledger.begin(anyone());
    let store = RecordStore::new(&txn, &registry);

    let by_owner: Vec<Record> = store
        .query_by_index("owner~key", "Tomoko")
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(by_owner.len(), 1);
    assert_eq!(by_owner[0].key, "CAR0");

    let range: Vec<KeyValue> = store
        .query_range("CAR0", "CAR1")
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(range.len(), 1);
    assert_eq!(range[0].key, "CAR0");
    assert_eq!(
        JsonCodec.decode(&range[0].value).unwrap(),
        car("Toyota", "Prius", "blue", "Tomoko")
    );
}

#[test]
fn read_after_create_decodes_to_fields() {
    let ledger = MemoryLedger::new();
    let registry = car_registry();
    let txn = ledger.begin(anyone());
    let store = RecordStore::new(&txn, &registry);

    let fields = car("Ford", "Mustang", "red", "Brad");
    store.create("car", "CAR1", fields.clone()).unwrap();
    assert_eq!(JsonCodec.decode(&store.read("CAR1").unwrap()).unwrap(), fields);

    txn.commit().unwrap();
    let txn = ledger.begin(anyone());
    let store = RecordStore::new(&txn, &registry);
    assert_eq!(store.read_record("CAR1").unwrap().unwrap().fields, fields);
}

#[test]
fn uncommitted_create_is_invisible_elsewhere() {
    let ledger = MemoryLedger::new();
    let registry = car_registry();

    let writer = ledger.begin(anyone());
    RecordStore::new(&writer, &registry)
        .create("car", "CAR0", car("Toyota", "Prius", "blue", "Tomoko"))
        .unwrap();

    let reader = ledger.begin(anyone());
    let store = RecordStore::new(&reader, &registry);
    assert!(store.read("CAR0").unwrap().is_empty());
    assert_eq!(store.query_by_index("owner~key", "Tomoko").unwrap().count(), 0);

    drop(writer);
    assert_eq!(ledger.live_keys(), 0);
}

#[test]
fn range_with_empty_bounds_lists_every_record() {
    let ledger = MemoryLedger::new();
    let registry = car_registry();
    let txn = ledger.begin(anyone());
    let store = RecordStore::new(&txn, &registry);
    for (i, owner) in ["A", "B", "C"].iter().enumerate() {
        store
            .create("car", &format!("CAR{}", i), car("m", "m", "c", owner))
            .unwrap();
    }

    let keys: Vec<String> = store
        .query_range("", "")
        .unwrap()
        .map(|r| r.unwrap().key)
        .collect();
    assert_eq!(keys, vec!["CAR0", "CAR1", "CAR2"]);
}
