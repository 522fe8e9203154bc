//! Guarded command handlers.

use ledgerstore_core::LedgerAdapter;
use ledgerstore_engine::{AccessGate, RecordStore};

use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle GuardedRead command.
///
/// The gate runs before the key is validated or read.
pub fn guarded_read<L: LedgerAdapter + ?Sized>(
    store: &RecordStore<'_, L>,
    gate: &AccessGate,
    key: String,
) -> Result<Output> {
    let bytes = convert_result(store.guarded_read(gate, &key))?;
    Ok(Output::Bytes(bytes))
}
