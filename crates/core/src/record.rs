//! Record types
//!
//! A record is a flat mapping from field name to string value stored under a
//! primary key. The field set is fixed per [`RecordKind`](crate::kind::RecordKind);
//! the record itself carries no kind tag, matching how the payload is laid
//! out on the ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Field name to value mapping, kept sorted for deterministic encoding
pub type Fields = BTreeMap<String, String>;

/// A record addressed by its primary key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Primary key of the ledger slot holding this record
    pub key: String,
    /// Attribute values
    pub fields: Fields,
}

impl Record {
    /// Create a record from a key and its fields
    pub fn new(key: impl Into<String>, fields: Fields) -> Self {
        Record {
            key: key.into(),
            fields,
        }
    }

    /// Value of a field, if present
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Overwrite an existing field
    ///
    /// Setting a field the record does not carry is an `InvalidArgument`;
    /// records never grow new attributes through an update.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        match self.fields.get_mut(field) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(Error::invalid_argument(format!(
                "record '{}' has no field '{}'",
                self.key, field
            ))),
        }
    }
}

/// Build [`Fields`] from `(name, value)` pairs
///
/// ```
/// use ledgerstore_core::record::fields;
///
/// let f = fields([("make", "Toyota"), ("owner", "Tomoko")]);
/// assert_eq!(f["owner"], "Tomoko");
/// ```
pub fn fields<I, K, V>(pairs: I) -> Fields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
