//! Boundary JSON rendering
//!
//! Query results leave the executor as JSON arrays built by `serde_json`
//! from typed rows. Stored record payloads are embedded verbatim through
//! `RawValue`, so a record renders exactly as it sits on the ledger.
//!
//! Row layouts:
//!
//! ```text
//! [{"Key":"CAR0","Record":{...}}]
//! [{"TxId":"...","Value":{...}|null,"Timestamp":"2024-01-01 00:00:00.25 +0000 UTC","IsDelete":"false"}]
//! ```

use serde::Serialize;
use serde_json::value::RawValue;

use ledgerstore_core::{Fields, HistoryEntry, JsonCodec, RecordCodec};

use crate::convert::convert_result;
use crate::{Error, Output, Result};

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct QueryResult<'a> {
    key: &'a str,
    record: &'a RawValue,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct HistoryRecord<'a> {
    tx_id: &'a str,
    value: Option<&'a RawValue>,
    timestamp: String,
    is_delete: &'static str,
}

/// Parse a stored payload for verbatim embedding
fn embed<'a>(key: &str, bytes: &'a [u8]) -> Result<&'a RawValue> {
    serde_json::from_slice(bytes).map_err(|e| Error::MalformedRecord {
        reason: format!("stored value of {:?} is not JSON: {}", key, e),
    })
}

fn encode(fields: &Fields) -> Result<Vec<u8>> {
    convert_result(JsonCodec.encode(fields))
}

fn render_history(key: &str, entries: &[HistoryEntry]) -> Result<Vec<u8>> {
    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let value = match (&entry.value, entry.is_delete) {
            (Some(bytes), false) => Some(embed(key, bytes)?),
            _ => None,
        };
        rows.push(HistoryRecord {
            tx_id: &entry.tx_id,
            value,
            timestamp: entry.timestamp.to_wall_clock(),
            is_delete: if entry.is_delete { "true" } else { "false" },
        });
    }
    Ok(serde_json::to_vec(&rows)?)
}

/// Render an output as its boundary payload
pub(crate) fn render(output: &Output) -> Result<Vec<u8>> {
    match output {
        Output::Unit => Ok(Vec::new()),
        Output::Bytes(bytes) => Ok(bytes.clone()),
        Output::Record(record) => encode(&record.fields),
        Output::MaybeRecord(Some(record)) => encode(&record.fields),
        Output::MaybeRecord(None) => Ok(Vec::new()),
        Output::Entries(entries) => {
            let rows = entries
                .iter()
                .map(|e| {
                    Ok(QueryResult {
                        key: &e.key,
                        record: embed(&e.key, &e.value)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(serde_json::to_vec(&rows)?)
        }
        Output::Records(records) => {
            let payloads = records
                .iter()
                .map(|r| encode(&r.fields))
                .collect::<Result<Vec<_>>>()?;
            let rows = records
                .iter()
                .zip(&payloads)
                .map(|(r, bytes)| {
                    Ok(QueryResult {
                        key: &r.key,
                        record: embed(&r.key, bytes)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(serde_json::to_vec(&rows)?)
        }
        Output::History { key, entries } => render_history(key, entries),
    }
}
