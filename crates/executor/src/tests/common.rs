//! Shared fixtures for executor tests.

use ledgerstore_core::CallerIdentity;

use crate::{Executor, StoreConfig};

/// Executor over the default configuration.
pub fn create_test_executor() -> Executor {
    Executor::new(StoreConfig::default()).unwrap()
}

/// Caller holding the gate's required role.
pub fn approver() -> CallerIdentity {
    CallerIdentity::new("approver1", "Org1MSP").with_attribute("role", "approver")
}

/// Caller with a role the gate rejects.
pub fn viewer() -> CallerIdentity {
    CallerIdentity::new("viewer1", "Org1MSP").with_attribute("role", "viewer")
}

/// Owned argument list.
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
