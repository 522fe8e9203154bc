//! Query command handlers.
//!
//! Both handlers drain a lazy scan into the output. The scan's cursor is
//! released when the scan ends, or when an error stops the collect early.

use ledgerstore_core::LedgerAdapter;
use ledgerstore_engine::RecordStore;

use crate::convert::convert_result;
use crate::types::KeyedValue;
use crate::{Output, Result};

/// Handle QueryRange command.
pub fn query_range<L: LedgerAdapter + ?Sized>(
    store: &RecordStore<'_, L>,
    start: String,
    end: String,
) -> Result<Output> {
    let scan = convert_result(store.query_range(&start, &end))?;
    let entries = convert_result(
        scan.map(|item| item.map(KeyedValue::from))
            .collect::<ledgerstore_core::Result<Vec<_>>>(),
    )?;
    Ok(Output::Entries(entries))
}

/// Handle QueryByIndex command.
pub fn query_by_index<L: LedgerAdapter + ?Sized>(
    store: &RecordStore<'_, L>,
    index: String,
    value: String,
) -> Result<Output> {
    let matches = convert_result(store.query_by_index(&index, &value))?;
    let records = convert_result(matches.collect::<ledgerstore_core::Result<Vec<_>>>())?;
    Ok(Output::Records(records))
}
