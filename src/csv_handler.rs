use std::io::{Read, Write};

use log::{trace, warn};

use crate::error::{FinanceError, Result};
use crate::transaction::Transaction;

/// Header written on every rewrite. A legacy `Description` column is no longer emitted.
pub const HEADER: [&str; 3] = ["Date", "Amount", "Category"];

/// Reads transactions from CSV. Blank rows are skipped; any other row that
/// does not deserialize fails the whole load, naming its line.
pub fn load_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut transactions = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |pos| pos.line());
        if record.iter().all(str::is_empty) {
            trace!("Skipping empty row on line {}", line);
            continue;
        }
        let transaction: Transaction = record.deserialize(Some(&headers)).map_err(|e| {
            warn!("Failed to parse a transaction from line {}: {}", line, e);
            FinanceError::Format(format!("line {}: {}", line, e))
        })?;
        trace!("Loaded transaction {:?}", transaction);
        transactions.push(transaction);
    }
    Ok(transactions)
}

/// Writes the header followed by one row per transaction, in order.
pub fn write_transactions<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    for transaction in transactions {
        wtr.serialize(transaction)?;
    }
    wtr.flush()?;
    Ok(())
}
