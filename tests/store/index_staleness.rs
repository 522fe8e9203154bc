//! Index entries reflect the indexed value at creation time.

use ledgerstore_engine::RecordStore;
use ledgerstore_storage::MemoryLedger;

use crate::common::*;

fn owners_index_keys(store: &RecordStore<'_, ledgerstore_storage::LedgerTxn<'_>>, owner: &str) -> Vec<String> {
    store
        .query_by_index("owner~key", owner)
        .unwrap()
        .map(|r| r.unwrap().key)
        .collect()
}

#[test]
fn update_does_not_move_index_entry() {
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
    let before = owners_index_keys(&store, "Tomoko");
    store.set_field("CAR0", "owner", "Dave").unwrap();
    txn.commit().unwrap();

    let txn = ledger.begin(anyone());
    let store = RecordStore::new(&txn, &registry);
    assert_eq!(owners_index_keys(&store, "Tomoko"), before);
    assert!(owners_index_keys(&store, "Dave").is_empty());

    let stale = store
        .query_by_index("owner~key", "Tomoko")
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(stale.get("owner"), Some("Dave"));
}

#[test]
fn recreate_under_new_owner_adds_second_entry() {
    let ledger = MemoryLedger::new();
    let registry = car_registry();
    let txn = ledger.begin(anyone());
    let store = RecordStore::new(&txn, &registry);
    store
        .create("car", "CAR0", car("Toyota", "Prius", "blue", "Tomoko"))
        .unwrap();
    store
        .create("car", "CAR0", car("Toyota", "Prius", "blue", "Dave"))
        .unwrap();

    assert_eq!(owners_index_keys(&store, "Tomoko"), vec!["CAR0"]);
    assert_eq!(owners_index_keys(&store, "Dave"), vec!["CAR0"]);
}
