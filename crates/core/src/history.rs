//! Key history types
//!
//! History entries are produced solely by the ledger. Each describes one
//! committed write or delete of a key; the store only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ledger commit timestamp as a seconds + nanoseconds pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LedgerTimestamp {
    /// Seconds since Unix epoch
    pub seconds: i64,
    /// Nanosecond offset within the second, `0..1_000_000_000`
    pub nanos: i32,
}

impl LedgerTimestamp {
    /// Create a timestamp from its parts
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        LedgerTimestamp { seconds, nanos }
    }

    /// The current wall-clock time
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Convert from a chrono UTC datetime
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        LedgerTimestamp {
            seconds: at.timestamp(),
            nanos: at.timestamp_subsec_nanos() as i32,
        }
    }

    /// Convert to a chrono UTC datetime, if in range
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::from_timestamp(self.seconds, nanos)
    }

    /// Human-readable wall-clock rendering
    ///
    /// `2024-03-01 12:00:00.5 +0000 UTC`: the fraction keeps only significant
    /// digits and is omitted for whole seconds. Out-of-range timestamps fall
    /// back to the raw `seconds.nanos` pair rather than failing the query.
    pub fn to_wall_clock(&self) -> String {
        let at = match self.to_datetime() {
            Some(at) => at,
            None => return format!("{}.{:09}", self.seconds, self.nanos),
        };
        let mut out = at.format("%Y-%m-%d %H:%M:%S").to_string();
        if self.nanos > 0 {
            let fraction = format!("{:09}", self.nanos);
            out.push('.');
            out.push_str(fraction.trim_end_matches('0'));
        }
        out.push_str(" +0000 UTC");
        out
    }
}

/// One committed write or delete of a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Id of the transaction that produced this version
    pub tx_id: String,
    /// Written payload; `None` for deletes
    pub value: Option<Vec<u8>>,
    /// Whether this entry is a tombstone
    pub is_delete: bool,
    /// Commit time
    pub timestamp: LedgerTimestamp,
}

impl HistoryEntry {
    /// A write of `value`
    pub fn write(tx_id: impl Into<String>, value: Vec<u8>, timestamp: LedgerTimestamp) -> Self {
        HistoryEntry {
            tx_id: tx_id.into(),
            value: Some(value),
            is_delete: false,
            timestamp,
        }
    }

    /// A tombstone
    pub fn delete(tx_id: impl Into<String>, timestamp: LedgerTimestamp) -> Self {
        HistoryEntry {
            tx_id: tx_id.into(),
            value: None,
            is_delete: true,
            timestamp,
        }
    }
}
