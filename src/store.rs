use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::config::{StoreConfig, WriteMode};
use crate::csv_handler;
use crate::error::{FinanceError, Result};
use crate::transaction::{self, Transaction};

/// Ordered transactions held in memory and mirrored to a CSV file.
/// The whole file is rewritten after every insertion.
#[derive(Debug)]
pub struct TransactionStore {
    path: PathBuf,
    write_mode: WriteMode,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Opens the store, loading any existing file. A missing file yields an empty store.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let transactions = match File::open(&config.path) {
            Ok(file) => csv_handler::load_transactions(BufReader::new(file))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", config.path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        debug!("Loaded {} transactions from {}", transactions.len(), config.path.display());

        Ok(TransactionStore {
            path: config.path,
            write_mode: config.write_mode,
            transactions,
        })
    }

    /// Validates and appends a transaction, then rewrites the backing file.
    pub fn add(&mut self, transaction: Transaction) -> Result<()> {
        self.add_at(transaction, Local::now().naive_local())
    }

    fn add_at(&mut self, transaction: Transaction, now: NaiveDateTime) -> Result<()> {
        if !is_not_future(transaction.date(), now) {
            warn!("Rejected transaction dated {}", transaction.date());
            return Err(FinanceError::Validation(
                "Transaction date is in the future. Please enter a valid date.".into(),
            ));
        }
        transaction.validate_amount()?;
        transaction::checked_sum(self.total()?, transaction.amount)?;

        self.transactions.push(transaction);
        self.save()
    }

    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of every stored amount; fails rather than overflowing.
    pub fn total(&self) -> Result<Decimal> {
        self.transactions
            .iter()
            .try_fold(Decimal::ZERO, |sum, t| transaction::checked_sum(sum, t.amount))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        match self.write_mode {
            WriteMode::Overwrite => {
                let mut writer = BufWriter::new(File::create(&self.path)?);
                csv_handler::write_transactions(&mut writer, &self.transactions)?;
                writer.flush()?;
            }
            WriteMode::Atomic => self.save_atomic()?,
        }
        debug!("Wrote {} transactions to {}", self.transactions.len(), self.path.display());
        Ok(())
    }

    // Temp file lives next to the target so the rename stays on one filesystem.
    fn save_atomic(&self) -> Result<()> {
        let temp_path = temp_path_for(&self.path);
        let result = self.write_temp(&temp_path).and_then(|()| {
            fs::rename(&temp_path, &self.path)?;
            Ok(())
        });
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn write_temp(&self, temp_path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(temp_path)?);
        csv_handler::write_transactions(&mut writer, &self.transactions)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

impl fmt::Display for TransactionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionStore managing {} transactions.", self.transactions.len())
    }
}

/// A date counts as its midnight, so today is accepted and tomorrow is not.
fn is_not_future(date: NaiveDate, now: NaiveDateTime) -> bool {
    date.and_time(NaiveTime::MIN) <= now
}
