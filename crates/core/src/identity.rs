//! Caller identity
//!
//! The host's credential layer binds an identity to each transaction. The
//! store only ever reads single attributes from it, through
//! [`LedgerAdapter::caller_attribute`](crate::ledger::LedgerAdapter::caller_attribute).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identity of the client that submitted the current transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Client id, unique within its membership provider
    pub id: String,
    /// Membership provider id
    pub msp_id: String,
    /// Certificate attributes, e.g. `role`
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl CallerIdentity {
    /// Identity with no attributes
    pub fn new(id: impl Into<String>, msp_id: impl Into<String>) -> Self {
        CallerIdentity {
            id: id.into(),
            msp_id: msp_id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look up one attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
