use std::path::Path;

use csv::WriterBuilder;

use crate::error::ExtractError;
use crate::model::{JunkRow, TransactionRecord, TRANSACTION_FIELDS};

/// Write transactions as CSV with the fixed schema header.
pub fn write_csv(path: &Path, transactions: &[TransactionRecord]) -> Result<(), ExtractError> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    write_records(&mut writer, transactions)?;
    writer.flush()?;
    Ok(())
}

/// Serialize transactions to an in-memory CSV string.
pub fn to_csv_string(transactions: &[TransactionRecord]) -> Result<String, ExtractError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::<u8>::new());
    write_records(&mut writer, transactions)?;
    let bytes = writer
        .into_inner()
        .map_err(|error| ExtractError::Io(error.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write junk rows as CSV for the manual-review workflow. Rows are
/// positional with no fixed schema, so no header row is emitted; missing
/// positions come out as empty fields.
pub fn write_junk_csv(path: &Path, junk: &[JunkRow]) -> Result<(), ExtractError> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    for row in junk {
        writer.write_record(row.cells.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_records<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    transactions: &[TransactionRecord],
) -> Result<(), csv::Error> {
    writer.write_record(TRANSACTION_FIELDS)?;
    for t in transactions {
        writer.write_record([&t.date, &t.transaction, &t.credit, &t.debit, &t.balance])?;
    }
    Ok(())
}
