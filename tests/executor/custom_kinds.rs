//! Kinds, indexes and routes declared entirely in configuration.

use ledgerstore::{Executor, MemoryLedger, StoreConfig};

use crate::common::*;

const BOATS: &str = r#"
[gate]
attribute = "dept"
required = "harbour"

[[kinds]]
name = "boat"
fields = ["name", "berth", "captain"]
indexes = ["berth", "captain"]

[[routes]]
name = "registerBoat"
op = "create"
kind = "boat"

[[routes]]
name = "boatsAtBerth"
op = "query_by_index"
index = "berth~key"

[[routes]]
name = "boatsByCaptain"
op = "query_by_index"
index = "captain~key"

[[routes]]
name = "listBoats"
op = "query_range"

[[routes]]
name = "moveBoat"
op = "update_field"
field = "berth"

[[routes]]
name = "inspectBoat"
op = "guarded_read"

[[routes]]
name = "seedHarbour"
op = "seed"

[[seed]]
kind = "boat"
key = "BOAT1"
fields = { name = "Aurora", berth = "A1", captain = "Ines" }

[[seed]]
kind = "boat"
key = "BOAT2"
fields = { name = "Borealis", berth = "A1", captain = "Ola" }
"#;

fn harbour() -> Executor {
    Executor::new(StoreConfig::from_toml_str(BOATS).unwrap()).unwrap()
}

fn keys(payload: &[u8]) -> Vec<String> {
    json(payload)
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["Key"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn seed_writes_every_index() {
    let executor = harbour();
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    executor.invoke(&txn, "seedHarbour", &[]).unwrap();
    txn.commit().unwrap();
    assert_eq!(ledger.live_keys(), 6);

    let txn = ledger.begin(approver());
    assert_eq!(
        keys(&executor.invoke(&txn, "boatsAtBerth", &args(&["A1"])).unwrap()),
        vec!["BOAT1", "BOAT2"]
    );
    assert_eq!(
        keys(&executor.invoke(&txn, "boatsByCaptain", &args(&["Ola"])).unwrap()),
        vec!["BOAT2"]
    );
}

#[test]
fn range_route_takes_bounds_as_arguments() {
    let executor = harbour();
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    executor.invoke(&txn, "seedHarbour", &[]).unwrap();
    executor
        .invoke(&txn, "registerBoat", &args(&["BOAT3", "Cirrus", "B2", "Ines"]))
        .unwrap();

    assert_eq!(
        keys(&executor.invoke(&txn, "listBoats", &args(&["BOAT2", ""])).unwrap()),
        vec!["BOAT2", "BOAT3"]
    );
    assert_eq!(
        keys(&executor.invoke(&txn, "listBoats", &args(&["", ""])).unwrap()),
        vec!["BOAT1", "BOAT2", "BOAT3"]
    );
    assert!(executor.invoke(&txn, "listBoats", &[]).is_err());
}

#[test]
fn moving_a_boat_leaves_the_old_berth_entry() {
    let executor = harbour();
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    executor.invoke(&txn, "seedHarbour", &[]).unwrap();
    executor
        .invoke(&txn, "moveBoat", &args(&["BOAT1", "C3"]))
        .unwrap();

    let rows = json(&executor.invoke(&txn, "boatsAtBerth", &args(&["A1"])).unwrap());
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["Record"]["berth"], "C3");
    assert!(keys(&executor.invoke(&txn, "boatsAtBerth", &args(&["C3"])).unwrap()).is_empty());
}

#[test]
fn configured_gate_attribute_is_enforced() {
    let executor = harbour();
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    executor.invoke(&txn, "seedHarbour", &[]).unwrap();
    txn.commit().unwrap();

    let txn = ledger.begin(approver());
    assert_eq!(
        executor
            .invoke(&txn, "inspectBoat", &args(&["BOAT1"]))
            .unwrap_err()
            .code(),
        "forbidden"
    );

    let harbour_master = ledgerstore::CallerIdentity::new("hm", "PortMSP").with_attribute("dept", "harbour");
    let txn = ledger.begin(harbour_master);
    let boat = json(&executor.invoke(&txn, "inspectBoat", &args(&["BOAT1"])).unwrap());
    assert_eq!(boat["name"], "Aurora");
}

#[test]
fn fabcar_routes_are_absent() {
    let executor = harbour();
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    assert_eq!(
        executor.invoke(&txn, "queryCar", &args(&["CAR0"])).unwrap_err().code(),
        "unknown_function"
    );
}
