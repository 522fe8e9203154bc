//! Record codec
//!
//! All record payloads pass through a [`RecordCodec`] on their way to and from
//! the ledger. [`JsonCodec`] is the only implementation: a JSON object of
//! string values, fields in sorted order.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::record::Fields;

/// Record codec trait.
///
/// `encode` and `decode` must be mutual inverses for every well-formed
/// field map. `decode` must reject empty input rather than produce an empty
/// record.
pub trait RecordCodec: Send + Sync {
    /// Serialize fields to a payload
    fn encode(&self, fields: &Fields) -> Result<Vec<u8>>;

    /// Parse a payload back into fields
    fn decode(&self, bytes: &[u8]) -> Result<Fields>;

    /// Codec identifier, used in logs
    fn codec_id(&self) -> &str;
}

/// JSON object codec
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl RecordCodec for JsonCodec {
    fn encode(&self, fields: &Fields) -> Result<Vec<u8>> {
        serde_json::to_vec(fields).map_err(|e| Error::malformed(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Fields> {
        if bytes.is_empty() {
            return Err(Error::malformed("empty payload"));
        }
        let unique: UniqueFields =
            serde_json::from_slice(bytes).map_err(|e| Error::malformed(e.to_string()))?;
        Ok(unique.0)
    }

    fn codec_id(&self) -> &str {
        "json"
    }
}

/// Field map that refuses duplicate keys while deserializing
struct UniqueFields(Fields);

impl<'de> Deserialize<'de> for UniqueFields {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UniqueVisitor;

        impl<'de> Visitor<'de> for UniqueVisitor {
            type Value = UniqueFields;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object of string fields")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = Fields::new();
                while let Some((name, value)) = map.next_entry::<String, String>()? {
                    if fields.contains_key(&name) {
                        return Err(de::Error::custom(format!("duplicate field '{}'", name)));
                    }
                    fields.insert(name, value);
                }
                Ok(UniqueFields(fields))
            }
        }

        deserializer.deserialize_map(UniqueVisitor)
    }
}
