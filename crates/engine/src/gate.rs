//! Attribute-based access gate
//!
//! A guarded operation runs only if the caller's identity carries the
//! configured attribute with exactly the required value. Every other
//! outcome, including a failed attribute lookup, is a denial.

use serde::{Deserialize, Serialize};
use tracing::warn;

use ledgerstore_core::{Error, LedgerAdapter, Result};

/// Attribute checked by default
pub const DEFAULT_GATE_ATTRIBUTE: &str = "role";

/// Value required by default
pub const DEFAULT_GATE_VALUE: &str = "approver";

/// Caller-attribute predicate, evaluated fresh on every guarded call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGate {
    /// Attribute name looked up on the caller
    #[serde(default = "default_attribute")]
    pub attribute: String,
    /// Value the attribute must equal
    #[serde(default = "default_required")]
    pub required: String,
}

fn default_attribute() -> String {
    DEFAULT_GATE_ATTRIBUTE.to_string()
}

fn default_required() -> String {
    DEFAULT_GATE_VALUE.to_string()
}

impl Default for AccessGate {
    fn default() -> Self {
        AccessGate {
            attribute: default_attribute(),
            required: default_required(),
        }
    }
}

impl AccessGate {
    /// Gate on `attribute == required`
    pub fn new(attribute: impl Into<String>, required: impl Into<String>) -> Self {
        AccessGate {
            attribute: attribute.into(),
            required: required.into(),
        }
    }

    /// Permit or deny the caller of `ledger`'s transaction
    pub fn check<L: LedgerAdapter + ?Sized>(&self, ledger: &L) -> Result<()> {
        let value = match ledger.caller_attribute(&self.attribute) {
            Ok(Some(value)) => value,
            Ok(None) => {
                warn!(target: "ledgerstore::gate", attribute = %self.attribute, "caller lacks attribute");
                return Err(Error::forbidden(format!(
                    "client identity does not possess the attribute '{}'",
                    self.attribute
                )));
            }
            Err(e) => {
                warn!(target: "ledgerstore::gate", attribute = %self.attribute, error = %e, "attribute lookup failed");
                return Err(Error::forbidden(format!(
                    "error while retrieving attribute '{}'",
                    self.attribute
                )));
            }
        };
        if value != self.required {
            warn!(target: "ledgerstore::gate", attribute = %self.attribute, value = %value, "caller denied");
            return Err(Error::forbidden(format!(
                "only callers with {} '{}' may access this operation",
                self.attribute, self.required
            )));
        }
        Ok(())
    }
}
