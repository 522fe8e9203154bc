//! Error kinds and codes surfaced by invoke.

use ledgerstore::{Error, MemoryLedger};

use crate::common::*;

#[test]
fn unknown_function_names_the_function() {
    let executor = executor();
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    let err = executor.invoke(&txn, "deleteCar", &args(&["CAR0"])).unwrap_err();
    assert_eq!(err.code(), "unknown_function");
    assert!(err.to_string().contains("deleteCar"));
}

#[test]
fn private_data_functions_are_not_routed() {
    let executor = executor();
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    for name in ["createPrivateCar", "readPrivateCar", "readPrivateCarIMpleDetails"] {
        assert!(matches!(
            executor.invoke(&txn, name, &[]),
            Err(Error::UnknownFunction { .. })
        ));
    }
}

#[test]
fn arity_errors_report_expected_count() {
    let executor = executor();
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    let cases: [(&str, &[&str], usize); 4] = [
        ("queryCar", &[], 1),
        ("createCar", &["CAR10", "Honda"], 5),
        ("changeCarOwner", &["CAR0"], 2),
        ("queryCarsByOwner", &["a", "b"], 1),
    ];
    for (function, given, expected) in cases {
        let err = executor.invoke(&txn, function, &args(given)).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument {
                reason: format!("Incorrect number of arguments. Expecting {}", expected)
            },
            "{}",
            function
        );
    }
    assert!(matches!(
        executor.invoke(&txn, "getHistoryForAsset", &[]),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn restricted_method_forbidden_for_viewer() {
    let executor = executor();
    let ledger = seeded(&executor);
    let txn = ledger.begin(viewer());
    let err = executor
        .invoke(&txn, "restictedMethod", &args(&["CAR0"]))
        .unwrap_err();
    assert_eq!(err.code(), "forbidden");

    let txn = ledger.begin(approver());
    let payload = executor
        .invoke(&txn, "restictedMethod", &args(&["CAR0"]))
        .unwrap();
    assert_eq!(json(&payload)["owner"], "Tomoko");
}

#[test]
fn restricted_method_denies_viewer_before_counting_arguments() {
    let executor = executor();
    let ledger = seeded(&executor);
    let txn = ledger.begin(viewer());
    let cases: [&[&str]; 2] = [&[], &["CAR0", "CAR1"]];
    for given in cases {
        let err = executor
            .invoke(&txn, "restictedMethod", &args(given))
            .unwrap_err();
        assert_eq!(err.code(), "forbidden", "{} args", given.len());
    }

    let txn = ledger.begin(approver());
    let err = executor
        .invoke(&txn, "restictedMethod", &[])
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidArgument {
            reason: "Incorrect number of arguments. Expecting 1".to_string()
        }
    );
}

#[test]
fn reserved_character_in_indexed_value_writes_nothing() {
    let executor = executor();
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    let err = executor
        .invoke(
            &txn,
            "createCar",
            &args(&["CAR10", "Honda", "Civic", "grey", "Da\u{0}ve"]),
        )
        .unwrap_err();
    assert_eq!(err.code(), "encoding_error");
    assert_eq!(txn.pending_writes(), 0);
}

#[test]
fn failed_commit_is_an_adapter_error() {
    let executor = executor();
    let ledger = seeded(&executor);

    let a = ledger.begin(approver());
    let b = ledger.begin(approver());
    executor
        .invoke(&a, "changeCarOwner", &args(&["CAR0", "Dave"]))
        .unwrap();
    executor
        .invoke(&b, "changeCarOwner", &args(&["CAR0", "Ellen"]))
        .unwrap();
    a.commit().unwrap();
    let err: Error = b.commit().unwrap_err().into();
    assert_eq!(err.code(), "adapter_error");
}

#[test]
fn empty_key_is_invalid() {
    let executor = executor();
    let ledger = MemoryLedger::new();
    let txn = ledger.begin(approver());
    let err = executor.invoke(&txn, "queryCar", &args(&[""])).unwrap_err();
    assert_eq!(err.code(), "invalid_argument");
}
