//! Result types carried by [`Output`](crate::Output).

use serde::{Deserialize, Serialize};

use ledgerstore_core::KeyValue;

/// A key with its raw stored payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyedValue {
    /// Ledger key
    pub key: String,
    /// Stored bytes, passed through undecoded
    pub value: Vec<u8>,
}

impl From<KeyValue> for KeyedValue {
    fn from(kv: KeyValue) -> Self {
        KeyedValue {
            key: kv.key,
            value: kv.value,
        }
    }
}
