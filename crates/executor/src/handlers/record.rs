//! Record command handlers.

use ledgerstore_core::{Fields, LedgerAdapter};
use ledgerstore_engine::{RecordStore, SeedRecord};

use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle Read command.
pub fn read<L: LedgerAdapter + ?Sized>(store: &RecordStore<'_, L>, key: String) -> Result<Output> {
    let bytes = convert_result(store.read(&key))?;
    Ok(Output::Bytes(bytes))
}

/// Handle Create command.
pub fn create<L: LedgerAdapter + ?Sized>(
    store: &RecordStore<'_, L>,
    kind: String,
    key: String,
    fields: Fields,
) -> Result<Output> {
    let record = convert_result(store.create(&kind, &key, fields))?;
    Ok(Output::Record(record))
}

/// Handle UpdateField command.
pub fn update_field<L: LedgerAdapter + ?Sized>(
    store: &RecordStore<'_, L>,
    key: String,
    field: String,
    value: String,
) -> Result<Output> {
    let record = convert_result(store.set_field(&key, &field, &value))?;
    Ok(Output::MaybeRecord(record))
}

/// Handle Seed command.
pub fn seed<L: LedgerAdapter + ?Sized>(
    store: &RecordStore<'_, L>,
    records: &[SeedRecord],
) -> Result<Output> {
    convert_result(store.seed(records))?;
    Ok(Output::Unit)
}
