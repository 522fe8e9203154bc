//! Loading executors from `ledgerstore.toml`.

use ledgerstore::{Error, Executor, MemoryLedger, StoreConfig};
use ledgerstore_engine::CONFIG_FILE_NAME;

use crate::common::*;

#[test]
fn default_file_round_trips_to_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    StoreConfig::write_default_if_missing(&path).unwrap();

    let executor = Executor::from_file(&path).unwrap();
    assert_eq!(executor.config(), &StoreConfig::default());
    assert_eq!(executor.routes().len(), 9);
}

#[test]
fn existing_file_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "max_key_bytes = 16\n").unwrap();
    StoreConfig::write_default_if_missing(&path).unwrap();

    let executor = Executor::from_file(&path).unwrap();
    assert_eq!(executor.config().max_key_bytes, 16);
    assert!(executor.routes().is_empty());
}

#[test]
fn written_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    let mut config = StoreConfig::default();
    config.max_key_bytes = 8;
    config.write_to_file(&path).unwrap();

    let executor = Executor::from_file(&path).unwrap();
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    let err = executor
        .invoke(&txn, "queryCar", &args(&["CAR000000"]))
        .unwrap_err();
    assert_eq!(err.code(), "invalid_argument");
    assert!(executor
        .invoke(&txn, "queryCar", &args(&["CAR00000"]))
        .unwrap()
        .is_empty());
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Executor::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn bad_routes_fail_at_startup() {
    let toml = r#"
[[kinds]]
name = "car"
fields = ["make", "model", "color", "owner"]
indexes = ["owner"]

[[routes]]
name = "queryCarsByColor"
op = "query_by_index"
index = "color~key"
"#;
    let config = StoreConfig::from_toml_str(toml).unwrap();
    let err = Executor::new(config).unwrap_err();
    assert_eq!(err.code(), "config_error");
    assert!(err.to_string().contains("queryCarsByColor"));
}

#[test]
fn unparseable_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[[kinds]\nname = ").unwrap();
    assert_eq!(Executor::from_file(&path).unwrap_err().code(), "config_error");
}
