//! History command handler.

use ledgerstore_core::LedgerAdapter;
use ledgerstore_engine::RecordStore;

use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle History command.
pub fn history<L: LedgerAdapter + ?Sized>(store: &RecordStore<'_, L>, key: String) -> Result<Output> {
    let scan = convert_result(store.history(&key))?;
    let entries = convert_result(scan.collect::<ledgerstore_core::Result<Vec<_>>>())?;
    Ok(Output::History { key, entries })
}
